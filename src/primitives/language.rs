//! Static table of languages the highlighter understands
//!
//! Lookup is first-match-wins in table order. Inside a profile, keyword order
//! matters too: the annotator takes the first keyword that matches, and a
//! trailing `|` marks a type keyword.

use std::path::Path;

/// Feature flags of a language profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightFlags {
    pub numbers: bool,
    pub strings: bool,
    pub comments: bool,
    pub multiline_comments: bool,
}

/// How to syntax-highlight and auto-indent one language
#[derive(Debug, PartialEq, Eq)]
pub struct LanguageProfile {
    /// Display name shown in the status bar
    pub name: &'static str,
    /// Extensions (starting with `.`) or exact file names
    pub file_match: &'static [&'static str],
    /// Keywords in match priority order; `|` suffix marks a type keyword
    pub keywords: &'static [&'static str],
    pub single_line_comment: Option<&'static str>,
    /// Start and end delimiters of a block comment
    pub multiline_comment: Option<(&'static str, &'static str)>,
    pub flags: HighlightFlags,
    /// Byte that opens an indented block (`{`, or `:` for Python)
    pub indent_start: u8,
    /// Byte that closes an indented block, if the language has one
    pub indent_end: Option<u8>,
}

impl LanguageProfile {
    /// Whether `path` matches one of this profile's patterns
    pub fn matches(&self, path: &Path) -> bool {
        let file_name = path.file_name().and_then(|name| name.to_str());
        let extension = file_name.and_then(|name| name.rfind('.').map(|dot| &name[dot..]));
        let full = path.to_str();

        self.file_match.iter().any(|pattern| {
            if pattern.starts_with('.') {
                extension == Some(*pattern)
            } else {
                file_name == Some(*pattern) || full == Some(*pattern)
            }
        })
    }
}

const ALL_FEATURES: HighlightFlags = HighlightFlags {
    numbers: true,
    strings: true,
    comments: true,
    multiline_comments: true,
};

const C_KEYWORDS: &[&str] = &[
    // control flow
    "if", "else", "switch", "case", "default", "for", "while", "do", "break", "continue",
    "return", "goto",
    // types
    "char|", "short|", "int|", "long|", "float|", "double|", "void|", "_Bool|", "unsigned|",
    "signed|", "int32_t|", "ptrdiff_t|", "intptr_t|", "uintptr_t|",
    // qualifiers and storage
    "const", "volatile", "static", "extern", "register", "auto", "restrict", "inline",
    "struct", "union", "enum", "typedef", "sizeof|", "typeof|",
    // preprocessor
    "#define|", "#undef|", "#include|", "#if|", "#ifdef|", "#ifndef|", "#else|", "#elif|",
    "#endif|", "#pragma|",
    "true|", "false|",
    // C++
    "class", "public", "private", "protected", "namespace", "new", "delete", "this",
    "operator", "try", "catch", "throw",
];

const PYTHON_KEYWORDS: &[&str] = &[
    "def", "return", "if", "elif", "else", "for", "while", "break", "continue", "pass",
    "import", "from", "as", "class", "try", "except", "finally", "raise", "with", "lambda",
    "global", "nonlocal", "assert", "yield", "del", "True|", "False|", "None|",
];

const JS_KEYWORDS: &[&str] = &[
    "function", "return", "if", "else", "for", "while", "break", "continue", "var", "let",
    "const", "switch", "case", "default", "try", "catch", "finally", "throw", "class",
    "extends", "import", "from", "export", "new", "this", "super", "true|", "false|", "null|",
    "undefined|",
];

/// The language table, in lookup priority order
pub static LANGUAGES: &[LanguageProfile] = &[
    LanguageProfile {
        name: "C",
        file_match: &[".c", ".h", ".cpp"],
        keywords: C_KEYWORDS,
        single_line_comment: Some("//"),
        multiline_comment: Some(("/*", "*/")),
        flags: ALL_FEATURES,
        indent_start: b'{',
        indent_end: Some(b'}'),
    },
    LanguageProfile {
        name: "Python",
        file_match: &[".py"],
        keywords: PYTHON_KEYWORDS,
        single_line_comment: Some("#"),
        multiline_comment: None,
        flags: HighlightFlags {
            numbers: true,
            strings: true,
            comments: true,
            multiline_comments: false,
        },
        indent_start: b':',
        indent_end: None,
    },
    LanguageProfile {
        name: "JavaScript",
        file_match: &[".js", ".jsx"],
        keywords: JS_KEYWORDS,
        single_line_comment: Some("//"),
        multiline_comment: Some(("/*", "*/")),
        flags: ALL_FEATURES,
        indent_start: b'{',
        indent_end: Some(b'}'),
    },
];

/// First profile in table order matching `path`
pub fn detect_language(path: &Path) -> Option<&'static LanguageProfile> {
    LANGUAGES.iter().find(|profile| profile.matches(path))
}

/// Profile with the given display name
pub fn language_by_name(name: &str) -> Option<&'static LanguageProfile> {
    LANGUAGES.iter().find(|profile| profile.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_by_extension() {
        assert_eq!(detect_language(Path::new("src/main.c")).unwrap().name, "C");
        assert_eq!(detect_language(Path::new("a/b.h")).unwrap().name, "C");
        assert_eq!(detect_language(Path::new("tool.py")).unwrap().name, "Python");
        assert_eq!(detect_language(Path::new("app.jsx")).unwrap().name, "JavaScript");
        assert!(detect_language(Path::new("notes.txt")).is_none());
        assert!(detect_language(Path::new("Makefile")).is_none());
    }

    #[test]
    fn test_extension_uses_last_dot() {
        assert_eq!(detect_language(Path::new("archive.tar.c")).unwrap().name, "C");
        assert!(detect_language(Path::new("script.py.bak")).is_none());
    }

    #[test]
    fn test_language_by_name() {
        assert_eq!(language_by_name("python").unwrap().indent_start, b':');
        assert!(language_by_name("cobol").is_none());
    }
}
