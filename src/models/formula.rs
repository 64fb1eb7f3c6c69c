//! Model formulas.
//!
//! Supported syntax (whitespace is ignored):
//!
//! ```text
//! y ~ a + b          main effects
//! y ~ a + b + a:b    explicit interaction
//! y ~ a * b          same as the line above
//! y ~ a - 1          no intercept (also `+ 0`, `+ -1`)
//! y ~ 1              intercept only (`- 0` also keeps the intercept)
//! ```

use std::fmt;

use crate::error::FormulaError;

/// Largest number of variables one `a*b*...` item may join (2^n - 1 terms).
pub const MAX_STAR_VARIABLES: usize = 8;

/// A main effect (one variable) or an interaction (several variables).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub vars: Vec<String>,
}

impl Term {
    fn new(vars: Vec<String>) -> Self {
        Self { vars }
    }

    /// Two terms are the same if they contain the same variables in any order.
    fn same_as(&self, other: &Term) -> bool {
        self.vars.len() == other.vars.len() && self.vars.iter().all(|v| other.vars.contains(v))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.vars.join(":"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    pub response: String,
    pub terms: Vec<Term>,
    pub intercept: bool,
}

impl Formula {
    pub fn parse(text: &str) -> Result<Self, FormulaError> {
        let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        let (lhs, rhs) = compact
            .split_once('~')
            .ok_or_else(|| FormulaError::MissingTilde(text.to_string()))?;

        if lhs.is_empty() {
            return Err(FormulaError::EmptyResponse(text.to_string()));
        }
        check_name(text, lhs)?;

        let mut intercept = true;
        let mut terms: Vec<Term> = Vec::new();

        for (negated, item) in split_items(rhs) {
            if item.is_empty() {
                return Err(FormulaError::EmptyTerm {
                    formula: text.to_string(),
                });
            }
            match (negated, item) {
                (false, "1") | (true, "0") => intercept = true,
                (false, "0") | (true, "1") => intercept = false,
                (true, _) => {
                    // Removing a named term.
                    let removed = Term::new(parse_vars(text, item, ':')?);
                    terms.retain(|t| !t.same_as(&removed));
                }
                (false, _) => {
                    for term in expand_item(text, item)? {
                        if !terms.iter().any(|t| t.same_as(&term)) {
                            terms.push(term);
                        }
                    }
                }
            }
        }

        if terms.is_empty() && !intercept {
            return Err(FormulaError::NoTerms(text.to_string()));
        }

        Ok(Self {
            response: lhs.to_string(),
            terms,
            intercept,
        })
    }

    /// Every variable referenced on the right-hand side, deduplicated.
    pub fn predictors(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for term in &self.terms {
            for var in &term.vars {
                if !out.contains(&var.as_str()) {
                    out.push(var);
                }
            }
        }
        out
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if self.terms.is_empty() {
            parts.push("1".to_string());
        }
        parts.extend(self.terms.iter().map(Term::to_string));
        if !self.intercept {
            parts.push("0".to_string());
        }
        write!(f, "{} ~ {}", self.response, parts.join(" + "))
    }
}

/// Split the right-hand side on `+` / `-`, tagging items that were subtracted.
fn split_items(rhs: &str) -> Vec<(bool, &str)> {
    let mut out = Vec::new();
    let mut negated = false;
    let mut start = 0;
    for (i, ch) in rhs.char_indices() {
        if ch == '+' || ch == '-' {
            let item = &rhs[start..i];
            // A `-` right after the start or a `+` (`-1 + x`, `x + -1`) binds to what follows.
            if !(ch == '-' && item.is_empty() && !negated) {
                out.push((negated, item));
            }
            negated = ch == '-';
            start = i + 1;
        }
    }
    out.push((negated, &rhs[start..]));
    out
}

/// Expand `a*b*c` into all main effects and interactions, `a:b` into one term.
fn expand_item(formula: &str, item: &str) -> Result<Vec<Term>, FormulaError> {
    if !item.contains('*') {
        return Ok(vec![Term::new(parse_vars(formula, item, ':')?)]);
    }

    let factors = parse_vars(formula, item, '*')?;
    let n = factors.len();
    if n > MAX_STAR_VARIABLES {
        return Err(FormulaError::TooManyVariables {
            formula: formula.to_string(),
            count: n,
            max: MAX_STAR_VARIABLES,
        });
    }

    let mut terms = Vec::new();
    // Subsets ordered by size, then by position, e.g. a, b, c, a:b, a:c, b:c, a:b:c.
    for size in 1..=n {
        for mask in 1u32..(1u32 << n) {
            if mask.count_ones() as usize != size {
                continue;
            }
            let vars = (0..n)
                .filter(|i| mask & (1 << i) != 0)
                .map(|i| factors[i].clone())
                .collect();
            terms.push(Term::new(vars));
        }
    }
    Ok(terms)
}

fn parse_vars(formula: &str, item: &str, sep: char) -> Result<Vec<String>, FormulaError> {
    let mut vars: Vec<String> = Vec::new();
    for part in item.split(sep) {
        if part.is_empty() {
            return Err(FormulaError::EmptyTerm {
                formula: formula.to_string(),
            });
        }
        // `a*b:c` is not supported; each piece must be a plain name.
        check_name(formula, part)?;
        if !vars.iter().any(|v| v == part) {
            vars.push(part.to_string());
        }
    }
    Ok(vars)
}

fn check_name(formula: &str, name: &str) -> Result<(), FormulaError> {
    let valid = name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '.')
        && !name.chars().all(|c| c.is_ascii_digit());
    if valid {
        Ok(())
    } else {
        Err(FormulaError::InvalidName {
            formula: formula.to_string(),
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term_strings(f: &Formula) -> Vec<String> {
        f.terms.iter().map(Term::to_string).collect()
    }

    #[test]
    fn parses_main_effects() {
        let f = Formula::parse("lifeExp ~ gdpPercap + year").unwrap();
        assert_eq!(f.response, "lifeExp");
        assert_eq!(term_strings(&f), vec!["gdpPercap", "year"]);
        assert!(f.intercept);
    }

    #[test]
    fn star_expands_to_main_effects_and_interaction() {
        let f = Formula::parse("y ~ a*b").unwrap();
        assert_eq!(term_strings(&f), vec!["a", "b", "a:b"]);

        let f = Formula::parse("y ~ a*b*c").unwrap();
        assert_eq!(
            term_strings(&f),
            vec!["a", "b", "c", "a:b", "a:c", "b:c", "a:b:c"]
        );
    }

    #[test]
    fn duplicate_terms_are_dropped() {
        let f = Formula::parse("y ~ a + b + a:b + b:a + a*b").unwrap();
        assert_eq!(term_strings(&f), vec!["a", "b", "a:b"]);
    }

    #[test]
    fn intercept_can_be_removed() {
        let f = Formula::parse("y ~ x - 1").unwrap();
        assert!(!f.intercept);
        assert_eq!(term_strings(&f), vec!["x"]);

        let f = Formula::parse("y ~ 0 + x").unwrap();
        assert!(!f.intercept);

        let f = Formula::parse("y ~ -1 + x").unwrap();
        assert!(!f.intercept);
        assert_eq!(term_strings(&f), vec!["x"]);
    }

    #[test]
    fn signed_intercept_forms() {
        let f = Formula::parse("y ~ x + -1").unwrap();
        assert!(!f.intercept);
        assert_eq!(term_strings(&f), vec!["x"]);

        let f = Formula::parse("y ~ x - 0").unwrap();
        assert!(f.intercept);
        assert_eq!(term_strings(&f), vec!["x"]);

        let f = Formula::parse("y ~ 0 + x - 0").unwrap();
        assert!(f.intercept);

        assert!(matches!(
            Formula::parse("y ~ x + + z"),
            Err(FormulaError::EmptyTerm { .. })
        ));
        assert!(matches!(
            Formula::parse("y ~ x - - 1"),
            Err(FormulaError::EmptyTerm { .. })
        ));
    }

    #[test]
    fn star_with_too_many_variables_is_an_error() {
        let vars: Vec<String> = (0..32).map(|i| format!("v{i}")).collect();
        let text = format!("y ~ {}", vars.join("*"));
        assert_eq!(
            Formula::parse(&text),
            Err(FormulaError::TooManyVariables {
                formula: text.clone(),
                count: 32,
                max: MAX_STAR_VARIABLES,
            })
        );

        let f = Formula::parse(&format!("y ~ {}", vars[..MAX_STAR_VARIABLES].join("*"))).unwrap();
        assert_eq!(f.terms.len(), (1 << MAX_STAR_VARIABLES) - 1);
    }

    #[test]
    fn subtracting_a_term_removes_it() {
        let f = Formula::parse("y ~ a*b - a:b").unwrap();
        assert_eq!(term_strings(&f), vec!["a", "b"]);
    }

    #[test]
    fn intercept_only_model() {
        let f = Formula::parse("y ~ 1").unwrap();
        assert!(f.terms.is_empty());
        assert!(f.intercept);
        assert_eq!(f.to_string(), "y ~ 1");
    }

    #[test]
    fn rejects_malformed_formulas() {
        assert!(matches!(
            Formula::parse("y = x"),
            Err(FormulaError::MissingTilde(_))
        ));
        assert!(matches!(
            Formula::parse(" ~ x"),
            Err(FormulaError::EmptyResponse(_))
        ));
        assert!(matches!(
            Formula::parse("y ~ x + "),
            Err(FormulaError::EmptyTerm { .. })
        ));
        assert!(matches!(
            Formula::parse("y ~ 0"),
            Err(FormulaError::NoTerms(_))
        ));
        assert!(matches!(
            Formula::parse("y ~ log(x)"),
            Err(FormulaError::InvalidName { .. })
        ));
    }

    #[test]
    fn predictors_are_deduplicated() {
        let f = Formula::parse("y ~ a*b + c").unwrap();
        assert_eq!(f.predictors(), vec!["a", "b", "c"]);
    }
}
