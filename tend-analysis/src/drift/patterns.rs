//! Drift signature tables compiled into a single `RegexSet` per table,
//! matched single-pass over artifact content or external log text.

use std::sync::OnceLock;

use regex::RegexSet;

/// One signature: a regex source and the message reported on match.
pub struct Signature {
    pub pattern: &'static str,
    pub message: &'static str,
}

/// Signatures indicating deprecated API usage inside artifact content.
pub const DEPRECATED_SIGNATURES: &[Signature] = &[
    Signature {
        pattern: r"(?i)pandas\.DataFrame\.append",
        message: "DataFrame.append is deprecated, use concat",
    },
    Signature {
        pattern: r"(?i)\.append\(\s*ignore_index\s*=",
        message: "DataFrame.append call pattern is deprecated, use concat",
    },
    Signature {
        pattern: r"(?i)sklearn\.\w+\.\w+\(.*deprecated",
        message: "scikit-learn deprecated API usage",
    },
    Signature {
        pattern: r"(?i)from\s+deprecated\s+import",
        message: "Explicit deprecated import detected",
    },
    Signature {
        pattern: r"(?i)warnings\.warn\(.*deprecat",
        message: "Deprecation warning issued in code",
    },
    Signature {
        pattern: r"(?i)DeprecationWarning",
        message: "DeprecationWarning referenced in code",
    },
];

/// Signatures indicating execution failure inside external log text.
pub const ERROR_SIGNATURES: &[Signature] = &[
    Signature {
        pattern: r"(?m)Error:|ERROR:|Traceback \(most recent call last\)",
        message: "Error pattern detected in output",
    },
    Signature {
        pattern: r"ModuleNotFoundError",
        message: "Missing module dependency",
    },
    Signature {
        pattern: r"ImportError",
        message: "Import failure detected",
    },
    Signature {
        pattern: r"SyntaxError",
        message: "Syntax error in code",
    },
    Signature {
        pattern: r"NameError",
        message: "Undefined variable or reference",
    },
    Signature {
        pattern: r"TypeError.*NoneType",
        message: "None value error (possible missing data)",
    },
    Signature {
        pattern: r"FileNotFoundError",
        message: "Missing required file",
    },
    Signature {
        pattern: r"ConnectionError|ConnectTimeout",
        message: "Network connectivity issue",
    },
];

/// A signature table compiled for single-pass matching.
pub struct SignatureSet {
    regex_set: RegexSet,
    signatures: &'static [Signature],
}

impl SignatureSet {
    fn compile(signatures: &'static [Signature]) -> Self {
        // Static tables are verified by the table tests; a compile failure
        // degrades to an empty set.
        match RegexSet::new(signatures.iter().map(|s| s.pattern)) {
            Ok(regex_set) => Self { regex_set, signatures },
            Err(err) => {
                tracing::error!(%err, "signature table failed to compile");
                Self { regex_set: RegexSet::empty(), signatures: &[] }
            }
        }
    }

    /// All signatures matching `content`, in table order.
    pub fn matches<'a>(&'a self, content: &str) -> Vec<&'a Signature> {
        self.regex_set
            .matches(content)
            .into_iter()
            .map(|idx| &self.signatures[idx])
            .collect()
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}

/// Compiled deprecated-API table (compiled once per process).
pub fn deprecated_apis() -> &'static SignatureSet {
    static SET: OnceLock<SignatureSet> = OnceLock::new();
    SET.get_or_init(|| SignatureSet::compile(DEPRECATED_SIGNATURES))
}

/// Compiled execution-error table.
pub fn execution_errors() -> &'static SignatureSet {
    static SET: OnceLock<SignatureSet> = OnceLock::new();
    SET.get_or_init(|| SignatureSet::compile(ERROR_SIGNATURES))
}

/// Explicit "last updated" date references inside runbook prose, in ISO
/// (`2024-01-15`) or written-out (`January 15, 2024`) form.
pub const LAST_UPDATED_SIGNATURES: &[Signature] = &[
    Signature {
        pattern: r"(?i)last updated[:\s]+\d{4}-\d{2}-\d{2}",
        message: "Runbook carries an explicit last-updated date",
    },
    Signature {
        pattern: r"(?i)last updated[:\s]+\w+ \d{1,2},? \d{4}",
        message: "Runbook carries an explicit last-updated date",
    },
];

/// Compiled last-updated-reference table.
pub fn last_updated_references() -> &'static SignatureSet {
    static SET: OnceLock<SignatureSet> = OnceLock::new();
    SET.get_or_init(|| SignatureSet::compile(LAST_UPDATED_SIGNATURES))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_compile() {
        assert!(deprecated_apis().len() >= 5);
        assert!(execution_errors().len() >= 8);
    }

    #[test]
    fn test_deprecated_pandas_append_detected() {
        let content = "df = pandas.DataFrame.append(df, row)";
        let hits = deprecated_apis().matches(content);
        assert!(!hits.is_empty());
        assert!(hits[0].message.contains("concat"));
    }

    #[test]
    fn test_clean_content_has_no_deprecated_hits() {
        let content = "df = pd.concat([a, b], ignore_index=True)\n";
        assert!(deprecated_apis().matches(content).is_empty());
    }

    #[test]
    fn test_last_updated_reference_forms() {
        assert!(!last_updated_references()
            .matches("Last updated: 2023-04-01\n## Scope\n")
            .is_empty());
        assert!(!last_updated_references()
            .matches("last updated March 3, 2022")
            .is_empty());
        assert!(last_updated_references()
            .matches("This runbook was updated recently.")
            .is_empty());
    }

    #[test]
    fn test_error_log_signatures() {
        let log = "Traceback (most recent call last)\nModuleNotFoundError: No module named 'scipy'";
        let hits = execution_errors().matches(log);
        assert!(hits.iter().any(|s| s.message.contains("Missing module")));
        assert!(hits.len() >= 2);
    }
}
