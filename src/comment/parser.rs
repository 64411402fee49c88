//! Static parse of controller sources for `@router` doc comments.
//!
//! Only inherent `impl` blocks are inspected. Each method's `#[doc]`
//! attributes are read in source order and every `@router` line becomes one
//! [`RouteDeclaration`] keyed by `"<module>/<SelfType>"`. Types in a crate
//! root (`lib.rs`, `main.rs`) are keyed by `"<SelfType>"` alone: their
//! `module_path!()` is the crate name, which the file tree does not carry, and
//! the suffix lookup matches the bare key under any crate name.

use std::fs;
use std::path::{Path, PathBuf};

use syn::spanned::Spanned;
use syn::{Attribute, Expr, ExprLit, ImplItem, Item, Lit, Meta, Type};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

use crate::comment::annotation::{parse_router_line, AnnotationError};
use crate::comment::CommentRouteIndex;
use crate::routing::RouteDeclaration;

/// Files whose module name is their directory's name.
const DIR_MODULE_FILES: &[&str] = &["mod"];

/// Crate roots; their module name is the crate name.
const CRATE_ROOT_FILES: &[&str] = &["lib", "main"];

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("syntax error in {file}:{line}: {message}")]
    Syntax { file: PathBuf, line: usize, message: String },

    #[error("bad route annotation in {file}:{line}: {source}")]
    Annotation {
        file: PathBuf,
        line: usize,
        #[source]
        source: AnnotationError,
    },
}

/// Parse every `.rs` file under `root` into one index.
pub fn parse_dir(root: &Path) -> Result<CommentRouteIndex, ParseError> {
    let mut index = CommentRouteIndex::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

    for entry in walker {
        let entry = entry.map_err(|e| ParseError::Io {
            path: e.path().unwrap_or(root).to_path_buf(),
            source: e.into(),
        })?;

        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().and_then(|ext| ext.to_str()) != Some("rs") {
            continue;
        }

        let module = module_name(path);
        let routes = parse_file(path, &module)?;
        tracing::debug!(file = %path.display(), module = %module, routes = routes.len(), "Parsed controller source");
        for (key, declaration) in routes {
            index.push(key, declaration);
        }
    }

    Ok(index)
}

/// Parse one file whose module name is `module`.
pub fn parse_file(path: &Path, module: &str) -> Result<Vec<(String, RouteDeclaration)>, ParseError> {
    let source = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_source(&source, path, module)
}

/// Parse source text; `file` is only used in error messages.
pub fn parse_source(source: &str, file: &Path, module: &str) -> Result<Vec<(String, RouteDeclaration)>, ParseError> {
    let ast = syn::parse_file(source).map_err(|e| ParseError::Syntax {
        file: file.to_path_buf(),
        line: e.span().start().line,
        message: e.to_string(),
    })?;

    let mut out = Vec::new();
    collect(&ast.items, module, file, &mut out)?;
    Ok(out)
}

fn collect(
    items: &[Item],
    module: &str,
    file: &Path,
    out: &mut Vec<(String, RouteDeclaration)>,
) -> Result<(), ParseError> {
    for item in items {
        match item {
            Item::Impl(imp) if imp.trait_.is_none() => {
                let Some(type_name) = self_type_name(&imp.self_ty) else {
                    continue;
                };
                let key = if module.is_empty() {
                    type_name
                } else {
                    format!("{module}/{type_name}")
                };

                for impl_item in &imp.items {
                    let ImplItem::Fn(method) = impl_item else {
                        continue;
                    };
                    for (line, text) in doc_lines(&method.attrs) {
                        let Some(parsed) = parse_router_line(&text) else {
                            continue;
                        };
                        let (path, verbs) = parsed.map_err(|source| ParseError::Annotation {
                            file: file.to_path_buf(),
                            line,
                            source,
                        })?;
                        out.push((key.clone(), RouteDeclaration::new(method.sig.ident.to_string(), path, verbs)));
                    }
                }
            }
            Item::Mod(inline) => {
                if let Some((_, nested)) = &inline.content {
                    collect(nested, &inline.ident.to_string(), file, out)?;
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn self_type_name(ty: &Type) -> Option<String> {
    match ty {
        Type::Path(tp) => tp.path.segments.last().map(|s| s.ident.to_string()),
        _ => None,
    }
}

/// Doc comment lines with the source line of the attribute they came from.
fn doc_lines(attrs: &[Attribute]) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    for attr in attrs.iter().filter(|a| a.path().is_ident("doc")) {
        let Meta::NameValue(nv) = &attr.meta else {
            continue;
        };
        let Expr::Lit(ExprLit { lit: Lit::Str(s), .. }) = &nv.value else {
            continue;
        };

        let start = attr.span().start().line;
        for (offset, raw) in s.value().lines().enumerate() {
            let text = raw.trim();
            let text = text.strip_prefix('*').map(str::trim_start).unwrap_or(text);
            lines.push((start + offset, text.to_string()));
        }
    }
    lines
}

fn module_name(path: &Path) -> String {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    if CRATE_ROOT_FILES.contains(&stem) {
        return String::new();
    }
    if DIR_MODULE_FILES.contains(&stem) {
        if let Some(dir) = path.parent().and_then(Path::file_name).and_then(|s| s.to_str()) {
            return dir.to_string();
        }
    }
    stem.to_string()
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_str().is_some_and(|s| s.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::Verb;

    const USER_CONTROLLER: &str = r#"
use autoroute::controller::Base;

#[derive(Default)]
pub struct UserController {
    base: Base,
}

impl UserController {
    /// Log a user in.
    ///
    /// @router /user/login [get,post]
    pub fn login(&mut self) {}

    /// @router /user/logout [delete]
    /// @router /user/signout
    pub fn logout(&mut self) {}

    /// Not routed.
    pub fn helper(&mut self) {}
}

impl Default for Other {
    /// @router /ignored
    fn default() -> Self { Other }
}
"#;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_parse_source_collects_annotations_in_order() {
        let routes = parse_source(USER_CONTROLLER, Path::new("admin.rs"), "admin").unwrap();
        let got: Vec<_> = routes
            .iter()
            .map(|(k, d)| (k.as_str(), d.method.as_str(), d.path.as_str(), d.verbs.clone()))
            .collect();

        assert_eq!(
            got,
            vec![
                ("admin/UserController", "login", "/user/login", vec![Verb::Get, Verb::Post]),
                ("admin/UserController", "logout", "/user/logout", vec![Verb::Delete]),
                ("admin/UserController", "logout", "/user/signout", vec![]),
            ]
        );
    }

    #[test]
    fn test_inline_module_names_key() {
        let src = r#"
mod home {
    pub struct PageController;
    impl PageController {
        /// @router /
        pub fn index(&mut self) {}
    }
}
"#;
        let routes = parse_source(src, Path::new("lib.rs"), "controller").unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].0, "home/PageController");
        assert_eq!(routes[0].1.path, "/");
    }

    #[test]
    fn test_syntax_error_reports_line() {
        let src = "pub struct Ok;\n\nimpl Broken {\n    fn x(&mut self) -> {}\n}\n";
        match parse_source(src, Path::new("broken.rs"), "broken") {
            Err(ParseError::Syntax { file, line, .. }) => {
                assert_eq!(file, PathBuf::from("broken.rs"));
                assert!(line >= 3, "line {line}");
            }
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_annotation_reports_line() {
        let src = "struct A;\nimpl A {\n    /// @router /a [fetch]\n    fn a(&mut self) {}\n}\n";
        match parse_source(src, Path::new("a.rs"), "a") {
            Err(ParseError::Annotation { line, source, .. }) => {
                assert_eq!(line, 3);
                assert!(matches!(source, AnnotationError::UnknownVerb { .. }));
            }
            other => panic!("expected annotation error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_dir_module_names_and_hidden_entries() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("controller");
        write(&root, "admin.rs", USER_CONTROLLER);
        write(
            &root,
            "shop/mod.rs",
            "pub struct CartController;\nimpl CartController {\n    /// @router /cart [put]\n    pub fn put(&mut self) {}\n}\n",
        );
        write(&root, ".hidden/secret.rs", "struct S;\nimpl S {\n    /// @router /secret\n    fn s(&mut self) {}\n}\n");
        write(&root, "notes.txt", "@router /not-rust");
        fs::create_dir_all(root.join("empty")).unwrap();

        let index = parse_dir(&root).unwrap();
        assert_eq!(index.keys().collect::<Vec<_>>(), vec!["admin/UserController", "shop/CartController"]);
        assert_eq!(index.declaration_count(), 4);
    }

    #[test]
    fn test_crate_root_types_match_under_any_crate_name() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("src");
        write(
            &root,
            "lib.rs",
            "pub struct RootController;\nimpl RootController {\n    /// @router /ping [get]\n    pub fn ping(&mut self) {}\n}\n",
        );
        write(
            &root,
            "bin/tool/main.rs",
            "pub struct ToolController;\nimpl ToolController {\n    /// @router /tool\n    pub fn run(&mut self) {}\n}\n",
        );

        let index = parse_dir(&root).unwrap();
        assert_eq!(index.keys().collect::<Vec<_>>(), vec!["RootController", "ToolController"]);

        let root_routes = index.lookup("mycrate/RootController").unwrap();
        assert_eq!(root_routes[0].path, "/ping");
        assert!(index.lookup("tool/ToolController").is_some());
        assert!(index.lookup("mycrate/OtherController").is_none());
    }

    #[test]
    fn test_parse_dir_without_annotations_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "plain.rs", "pub struct Plain;\nimpl Plain { pub fn go(&self) {} }\n");
        assert!(parse_dir(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_parse_dir_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(parse_dir(&dir.path().join("nope")), Err(ParseError::Io { .. })));
    }
}
