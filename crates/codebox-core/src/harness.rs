//! Snippet harness — best-effort rewriting of bare generated snippets
//!
//! Generated code often arrives fenced in Markdown, or as a lone function
//! with no entrypoint. The harness strips fences and synthesizes a minimal
//! entrypoint with example arguments so such snippets run at all. These are
//! heuristics, strictly best effort, and live outside the sandbox: the
//! engine never inspects code shape. Snippets that already look complete
//! pass through unchanged.

use std::sync::OnceLock;

use regex::Regex;

use crate::language::Language;
use crate::sandbox::workspace;

/// A detected function signature: name plus parameter names.
#[derive(Debug, PartialEq, Eq)]
struct Signature {
    name: String,
    params: Vec<String>,
}

/// Remove a Markdown code fence (with optional language tag) around a
/// snippet. Text without a fence passes through trimmed.
pub fn strip_code_fences(text: &str) -> String {
    static FENCE_RE: OnceLock<Regex> = OnceLock::new();
    let re = FENCE_RE.get_or_init(|| Regex::new(r"(?s)```(?:\w+)?\n(.*?)```").unwrap());

    match re.captures(text) {
        Some(caps) => caps[1].trim().to_string(),
        None => text.trim().to_string(),
    }
}

/// Make a bare snippet runnable by appending or wrapping an entrypoint
/// that calls the first detected function with synthesized arguments.
///
/// Sources that already carry an entrypoint pass through unchanged, as do
/// sources where no function signature is detected. Java sources always
/// get their public class renamed to `Main` so they compile as
/// `Main.java`.
pub fn wrap_runnable_code(language: Language, source: &str) -> String {
    match language {
        Language::Python => wrap_python(source),
        Language::Javascript => wrap_javascript(source),
        Language::Cpp => wrap_cpp(source),
        Language::Java => wrap_java(source),
    }
}

fn wrap_python(source: &str) -> String {
    if source.contains("if __name__") {
        return source.to_string();
    }
    let Some(signature) = detect_signature(Language::Python, source) else {
        return source.to_string();
    };
    let call = call_expression(&signature, Language::Python);
    format!("{source}\n\nif __name__ == \"__main__\":\n    print({call})\n")
}

fn wrap_javascript(source: &str) -> String {
    if source.contains("console.log") {
        return source.to_string();
    }
    let Some(signature) = detect_signature(Language::Javascript, source) else {
        return source.to_string();
    };
    let call = call_expression(&signature, Language::Javascript);
    format!("{source}\n\nconsole.log({call});\n")
}

fn wrap_cpp(source: &str) -> String {
    if source.contains("int main") {
        return source.to_string();
    }
    let Some(signature) = detect_signature(Language::Cpp, source) else {
        return source.to_string();
    };
    let call = call_expression(&signature, Language::Cpp);
    format!(
        "#include <iostream>\n#include <vector>\nusing namespace std;\n\n{source}\n\n\
         int main() {{\n    auto result = {call};\n    cout << result << endl;\n    return 0;\n}}\n"
    )
}

fn wrap_java(source: &str) -> String {
    let source = workspace::normalize_java_class(source);
    if source.contains("public static void main") {
        return source.into_owned();
    }
    // A class without a main method cannot be wrapped without nesting
    // classes; leave it alone.
    if source.contains("class ") {
        return source.into_owned();
    }
    let Some(signature) = detect_signature(Language::Java, &source) else {
        return source.into_owned();
    };
    let call = call_expression(&signature, Language::Java);
    format!(
        "public class Main {{\n    {source}\n\n    public static void main(String[] args) {{\n        \
         var result = {call};\n        System.out.println(result);\n    }}\n}}\n"
    )
}

/// Find the first function signature in the source.
fn detect_signature(language: Language, source: &str) -> Option<Signature> {
    static PYTHON_RE: OnceLock<Regex> = OnceLock::new();
    static JAVASCRIPT_RE: OnceLock<Regex> = OnceLock::new();
    static CPP_RE: OnceLock<Regex> = OnceLock::new();
    static JAVA_RE: OnceLock<Regex> = OnceLock::new();

    let re = match language {
        Language::Python => {
            PYTHON_RE.get_or_init(|| Regex::new(r"def\s+(\w+)\s*\(([^)]*)\)").unwrap())
        }
        Language::Javascript => {
            JAVASCRIPT_RE.get_or_init(|| Regex::new(r"function\s+(\w+)\s*\(([^)]*)\)").unwrap())
        }
        Language::Cpp => CPP_RE.get_or_init(|| {
            Regex::new(r"(?:vector<\w+>|int|void|string)\s+(\w+)\s*\(([^)]*)\)").unwrap()
        }),
        Language::Java => JAVA_RE.get_or_init(|| {
            Regex::new(r"(?:public\s+)?(?:static\s+)?\w+\s+(\w+)\s*\(([^)]*)\)").unwrap()
        }),
    };

    let caps = re.captures(source)?;
    let name = caps[1].to_string();
    let params = parse_params(&caps[2], language);
    Some(Signature { name, params })
}

/// Extract parameter names from a matched parameter list.
fn parse_params(list: &str, language: Language) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|param| !param.is_empty())
        .map(|param| match language {
            // Strip a default value if present.
            Language::Python => param.split('=').next().unwrap_or(param).trim().to_string(),
            // Typed declarations: the name is the last token.
            Language::Java | Language::Cpp => param
                .split_whitespace()
                .last()
                .unwrap_or(param)
                .to_string(),
            Language::Javascript => param.to_string(),
        })
        .collect()
}

/// Build `name(arg, arg, ...)` with example values guessed from the
/// parameter names.
fn call_expression(signature: &Signature, language: Language) -> String {
    let args: Vec<&str> = signature
        .params
        .iter()
        .map(|param| example_value(param, language))
        .collect();
    format!("{}({})", signature.name, args.join(", "))
}

fn example_value(param: &str, language: Language) -> &'static str {
    let lower = param.to_ascii_lowercase();
    if lower.contains("num") || lower.contains("arr") || lower.contains("list") {
        match language {
            Language::Java => "new int[]{2, 7, 11, 15}",
            Language::Cpp => "{2, 7, 11, 15}",
            Language::Python | Language::Javascript => "[2, 7, 11, 15]",
        }
    } else if lower.contains("target") || lower.contains('k') {
        "9"
    } else if lower.contains("str") || lower == "s" {
        "\"example\""
    } else {
        "0"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_fences_with_language_tag() {
        let text = "```python\nprint('hi')\n```";
        assert_eq!(strip_code_fences(text), "print('hi')");
    }

    #[test]
    fn test_strip_fences_without_tag() {
        let text = "Here you go:\n```\nconsole.log(1);\n```\nEnjoy!";
        assert_eq!(strip_code_fences(text), "console.log(1);");
    }

    #[test]
    fn test_strip_fences_passthrough() {
        assert_eq!(strip_code_fences("  print('hi')\n"), "print('hi')");
    }

    #[test]
    fn test_strip_fences_takes_first_block() {
        let text = "```python\nfirst\n```\ntext\n```python\nsecond\n```";
        assert_eq!(strip_code_fences(text), "first");
    }

    #[test]
    fn test_python_signature_detection() {
        let sig = detect_signature(Language::Python, "def two_sum(nums, target=9):\n    pass")
            .unwrap();
        assert_eq!(sig.name, "two_sum");
        assert_eq!(sig.params, vec!["nums", "target"]);
    }

    #[test]
    fn test_java_signature_strips_types() {
        let sig = detect_signature(
            Language::Java,
            "public static int twoSum(int[] nums, int target) { return 0; }",
        )
        .unwrap();
        assert_eq!(sig.name, "twoSum");
        assert_eq!(sig.params, vec!["nums", "target"]);
    }

    #[test]
    fn test_cpp_signature_with_vector_return() {
        let sig = detect_signature(
            Language::Cpp,
            "vector<int> twoSum(vector<int>& nums, int target) { return {}; }",
        )
        .unwrap();
        assert_eq!(sig.name, "twoSum");
        assert_eq!(sig.params, vec!["nums", "target"]);
    }

    #[test]
    fn test_wrap_python_appends_entrypoint() {
        let wrapped = wrap_runnable_code(Language::Python, "def two_sum(nums, target):\n    return []");
        assert!(wrapped.contains("if __name__ == \"__main__\":"));
        assert!(wrapped.contains("print(two_sum([2, 7, 11, 15], 9))"));
    }

    #[test]
    fn test_wrap_python_existing_entrypoint_untouched() {
        let source = "def f():\n    pass\n\nif __name__ == \"__main__\":\n    f()";
        assert_eq!(wrap_runnable_code(Language::Python, source), source);
    }

    #[test]
    fn test_wrap_python_no_signature_passthrough() {
        let source = "print('already a script')";
        assert_eq!(wrap_runnable_code(Language::Python, source), source);
    }

    #[test]
    fn test_wrap_javascript_appends_console_log() {
        let wrapped =
            wrap_runnable_code(Language::Javascript, "function greet(s) { return s; }");
        assert!(wrapped.contains("console.log(greet(\"example\"));"));
    }

    #[test]
    fn test_wrap_javascript_with_existing_log_untouched() {
        let source = "function f() {}\nconsole.log(f());";
        assert_eq!(wrap_runnable_code(Language::Javascript, source), source);
    }

    #[test]
    fn test_wrap_cpp_synthesizes_main() {
        let wrapped = wrap_runnable_code(
            Language::Cpp,
            "vector<int> twoSum(vector<int>& nums, int target) { return {}; }",
        );
        assert!(wrapped.contains("int main()"));
        assert!(wrapped.contains("twoSum({2, 7, 11, 15}, 9)"));
        assert!(wrapped.contains("#include <vector>"));
    }

    #[test]
    fn test_wrap_cpp_existing_main_untouched() {
        let source = "#include <iostream>\nint main() { return 0; }";
        assert_eq!(wrap_runnable_code(Language::Cpp, source), source);
    }

    #[test]
    fn test_wrap_java_bare_method() {
        let wrapped = wrap_runnable_code(
            Language::Java,
            "public static int twoSum(int[] nums, int target) { return 0; }",
        );
        assert!(wrapped.starts_with("public class Main {"));
        assert!(wrapped.contains("public static void main(String[] args)"));
        assert!(wrapped.contains("twoSum(new int[]{2, 7, 11, 15}, 9)"));
    }

    #[test]
    fn test_wrap_java_renames_class_with_main() {
        let source = "public class Solution {\n    public static void main(String[] args) {}\n}";
        let wrapped = wrap_runnable_code(Language::Java, source);
        assert!(wrapped.contains("public class Main"));
        assert!(!wrapped.contains("Solution"));
    }

    #[test]
    fn test_wrap_java_class_without_main_not_nested() {
        let source = "public class Solution {\n    int f() { return 1; }\n}";
        let wrapped = wrap_runnable_code(Language::Java, source);
        assert!(wrapped.contains("public class Main"));
        // No synthesized entrypoint and no nested class.
        assert!(!wrapped.contains("public static void main"));
    }

    #[test]
    fn test_example_values() {
        assert_eq!(example_value("numbers", Language::Python), "[2, 7, 11, 15]");
        assert_eq!(example_value("arr", Language::Cpp), "{2, 7, 11, 15}");
        assert_eq!(example_value("target", Language::Python), "9");
        assert_eq!(example_value("k", Language::Javascript), "9");
        assert_eq!(example_value("s", Language::Python), "\"example\"");
        assert_eq!(example_value("needle_str", Language::Java), "\"example\"");
        assert_eq!(example_value("flag", Language::Python), "0");
    }
}
