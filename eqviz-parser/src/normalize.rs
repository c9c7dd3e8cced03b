//! Rewrites the notation people actually type into the plain ASCII syntax understood by the
//! [`Parser`](crate::parser::Parser).
//!
//! Normalization never fails. Input that is still not valid afterwards is reported by the parser.

/// Names of the functions that can be called in an expression. A letter run with one of these
/// names that is directly followed by `(` is a function call, not an implicit multiplication.
pub const KNOWN_FUNCTIONS: [&str; 13] = [
    "sin", "cos", "tan",
    "asin", "acos", "atan",
    "sinh", "cosh", "tanh",
    "log", "sqrt", "exp", "abs",
];

/// Left-hand sides of an equation that name the dependent variable, such as `z = x^2 + y^2`.
const DEPENDENT_NAMES: [&str; 3] = ["z", "y", "f"];

/// Notational symbols and their ASCII replacements, applied in order.
const SYMBOLS: [(&str, &str); 14] = [
    ("sin⁻¹", "asin"),
    ("cos⁻¹", "acos"),
    ("tan⁻¹", "atan"),
    ("**", "^"),
    ("²", "^2"),
    ("³", "^3"),
    ("×", "*"),
    ("·", "*"),
    ("⋅", "*"),
    ("∙", "*"),
    ("÷", "/"),
    ("−", "-"),
    ("–", "-"),
    ("π", "pi"),
];

/// Identifiers that are spelled differently from the name the evaluator knows them by. Only whole
/// letter runs are renamed.
const IDENTIFIERS: [(&str, &str); 4] = [
    ("ln", "log"),
    ("arcsin", "asin"),
    ("arccos", "acos"),
    ("arctan", "atan"),
];

/// Normalizes the given expression text.
///
/// The steps, in order:
///
/// 1. An equation is split at its first `=`. If the left side names the dependent variable (`z`,
///    `y`, or `f`), only the right side is kept; otherwise the equation becomes `(left) - (right)`.
/// 2. Notational symbols (`²`, `×`, `π`, `sin⁻¹`, `√`, ...) and alternate function names (`ln`,
///    `arcsin`, ...) are replaced with their ASCII equivalents.
/// 3. Implicit multiplication is made explicit: `2x` becomes `2*x`, `x(y+1)` becomes `x*(y+1)`,
///    and so on. Known function names followed by `(` are left alone.
///
/// ```
/// use eqviz_parser::normalize;
///
/// assert_eq!(normalize("z = 2x²"), "2*x^2");
/// assert_eq!(normalize("x+1=y"), "(x+1) - (y)");
/// ```
pub fn normalize(input: &str) -> String {
    let text = split_equation(input.trim());
    let text = SYMBOLS
        .iter()
        .fold(text, |text, (from, to)| text.replace(from, to));
    let text = rename_identifiers(&text);
    let text = expand_roots(&text);
    insert_implicit_multiplication(&text)
}

/// Splits an equation at its first `=`. Any further `=` stays in the right side.
fn split_equation(text: &str) -> String {
    let Some((left, right)) = text.split_once('=') else {
        return text.to_string();
    };

    let (left, right) = (left.trim(), right.trim());
    if DEPENDENT_NAMES.contains(&left) {
        right.to_string()
    } else {
        format!("({}) - ({})", left, right)
    }
}

/// Returns true if the character can be part of an identifier.
fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// Replaces whole letter runs found in [`IDENTIFIERS`].
fn rename_identifiers(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut run = String::new();

    let flush = |run: &mut String, output: &mut String| {
        let renamed = IDENTIFIERS
            .iter()
            .find(|(from, _)| *from == run.as_str())
            .map_or(run.as_str(), |(_, to)| *to);
        output.push_str(renamed);
        run.clear();
    };

    for c in text.chars() {
        if is_letter(c) {
            run.push(c);
        } else {
            flush(&mut run, &mut output);
            output.push(c);
        }
    }
    flush(&mut run, &mut output);

    output
}

/// Replaces `√` with `sqrt`. When the radical sign is directly followed by a number or an
/// identifier, that operand is wrapped in parentheses: `√x` becomes `sqrt(x)`.
fn expand_roots(text: &str) -> String {
    let mut output = String::with_capacity(text.len() + 8);
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '√' {
            output.push(c);
            continue;
        }

        output.push_str("sqrt");
        let operand_kind: Option<fn(char) -> bool> = match chars.peek() {
            Some(next) if next.is_ascii_digit() || *next == '.' => Some(|c: char| c.is_ascii_digit() || c == '.'),
            Some(next) if is_letter(*next) => Some(is_letter),
            _ => None,
        };

        if let Some(belongs) = operand_kind {
            output.push('(');
            while let Some(&next) = chars.peek() {
                if !belongs(next) {
                    break;
                }
                output.push(next);
                chars.next();
            }
            output.push(')');
        }
    }

    output
}

/// Inserts `*` between adjacent operands that are multiplied implicitly.
fn insert_implicit_multiplication(text: &str) -> String {
    let mut output = String::with_capacity(text.len() + 8);

    // the run of letters that ends at the previous character, if any
    let mut run = String::new();
    let mut prev: Option<char> = None;

    for c in text.chars() {
        if let Some(p) = prev {
            let insert = (p.is_ascii_digit() && is_letter(c))
                || (is_letter(p) && c.is_ascii_digit())
                || (p == ')' && (is_letter(c) || c == '('))
                || (is_letter(p) && c == '(' && !KNOWN_FUNCTIONS.contains(&run.as_str()));
            if insert {
                output.push('*');
            }
        }

        if is_letter(c) {
            run.push(c);
        } else {
            run.clear();
        }

        output.push(c);
        prev = Some(c);
    }

    output
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn implicit_coefficient() {
        assert_eq!(normalize("2x"), "2*x");
    }

    #[test]
    fn explicit_function_definition() {
        assert_eq!(normalize("z = x^2"), "x^2");
        assert_eq!(normalize("y = sin(x)"), "sin(x)");
        assert_eq!(normalize("f=x+1"), "x+1");
    }

    #[test]
    fn implicit_equation() {
        assert_eq!(normalize("x+1=y"), "(x+1) - (y)");
        assert_eq!(normalize("x^2 + y^2 = 1"), "(x^2 + y^2) - (1)");
    }

    #[test]
    fn only_first_equals_splits() {
        assert_eq!(normalize("z = x = y"), "x = y");
    }

    #[test]
    fn already_normal() {
        assert_eq!(normalize("x^2+y^2"), "x^2+y^2");
        assert_eq!(normalize("  sin(x)*cos(y)  "), "sin(x)*cos(y)");
    }

    #[test]
    fn unicode_symbols() {
        assert_eq!(normalize("x² + y³"), "x^2 + y^3");
        assert_eq!(normalize("x**2"), "x^2");
        assert_eq!(normalize("x × y ÷ 2"), "x * y / 2");
        assert_eq!(normalize("x·y⋅z∙w"), "x*y*z*w");
        assert_eq!(normalize("x − y – 1"), "x - y - 1");
        assert_eq!(normalize("2π"), "2*pi");
    }

    #[test]
    fn inverse_trig() {
        assert_eq!(normalize("sin⁻¹(x)"), "asin(x)");
        assert_eq!(normalize("arccos(x) + arctan(y)"), "acos(x) + atan(y)");
    }

    #[test]
    fn natural_log_whole_runs_only() {
        assert_eq!(normalize("ln(x)"), "log(x)");
        assert_eq!(normalize("lnx"), "lnx");
    }

    #[test]
    fn square_roots() {
        assert_eq!(normalize("√x"), "sqrt(x)");
        assert_eq!(normalize("√2y"), "sqrt(2)*y");
        assert_eq!(normalize("√(x+1)"), "sqrt(x+1)");
    }

    #[test]
    fn implicit_multiplication_rules() {
        assert_eq!(normalize("x2"), "x*2");
        assert_eq!(normalize("(x+1)(x-1)"), "(x+1)*(x-1)");
        assert_eq!(normalize("(x+1)y"), "(x+1)*y");
        assert_eq!(normalize("x(y+1)"), "x*(y+1)");
        assert_eq!(normalize("3sin(x)"), "3*sin(x)");
    }

    #[test]
    fn function_calls_untouched() {
        for name in KNOWN_FUNCTIONS {
            let call = format!("{}(x)", name);
            assert_eq!(normalize(&call), call);
        }
    }
}
