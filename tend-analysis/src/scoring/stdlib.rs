//! Standard-library module name tables for dependency classification.
//!
//! An auto-detected import that resolves to a language's standard library
//! needs no version pin and counts as current. Tables cover the module
//! names that actually show up in indexed artifacts; unlisted names fall
//! through to "unknown", which is the lenient default.

/// Python standard-library modules commonly imported by notebooks/scripts.
const PYTHON_STDLIB: &[&str] = &[
    "abc", "argparse", "asyncio", "base64", "collections", "concurrent",
    "contextlib", "copy", "csv", "dataclasses", "datetime", "decimal",
    "enum", "functools", "glob", "gzip", "hashlib", "heapq", "html", "http",
    "importlib", "inspect", "io", "itertools", "json", "logging", "math",
    "multiprocessing", "os", "pathlib", "pickle", "platform", "pprint",
    "queue", "random", "re", "secrets", "shutil", "signal", "socket",
    "sqlite3", "statistics", "string", "struct", "subprocess", "sys",
    "tempfile", "textwrap", "threading", "time", "traceback", "types",
    "typing", "unittest", "urllib", "uuid", "warnings", "xml", "zipfile",
    "zlib",
];

/// Node.js built-in modules.
const NODE_BUILTINS: &[&str] = &[
    "assert", "buffer", "child_process", "crypto", "events", "fs", "http",
    "https", "net", "os", "path", "process", "readline", "stream",
    "string_decoder", "timers", "url", "util", "zlib",
];

/// Whether `name` is a standard-library module for `language`.
pub fn is_stdlib(language: &str, name: &str) -> bool {
    // Imports like `urllib.request` resolve by their top-level module.
    let top = name.split('.').next().unwrap_or(name);
    match language.to_lowercase().as_str() {
        "python" => PYTHON_STDLIB.binary_search(&top).is_ok(),
        "javascript" | "typescript" | "node" => {
            let trimmed = top.strip_prefix("node:").unwrap_or(top);
            NODE_BUILTINS.binary_search(&trimmed).is_ok()
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_sorted_for_binary_search() {
        assert!(PYTHON_STDLIB.windows(2).all(|w| w[0] < w[1]));
        assert!(NODE_BUILTINS.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_python_stdlib_recognized() {
        assert!(is_stdlib("python", "json"));
        assert!(is_stdlib("Python", "urllib.request"));
        assert!(!is_stdlib("python", "pandas"));
    }

    #[test]
    fn test_node_builtins_recognized() {
        assert!(is_stdlib("javascript", "fs"));
        assert!(is_stdlib("typescript", "node:path"));
        assert!(!is_stdlib("javascript", "express"));
    }

    #[test]
    fn test_unsupported_language_is_never_stdlib() {
        assert!(!is_stdlib("ruby", "json"));
    }
}
