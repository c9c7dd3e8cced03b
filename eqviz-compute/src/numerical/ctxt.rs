use crate::consts::CONSTANTS;
use std::collections::HashMap;

/// A context to use when evaluating an expression, containing the values of the variables that
/// can be used within the expression.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ctxt {
    /// The variables in the context.
    vars: HashMap<String, f64>,
}

/// The default context binds the named constants `pi` and `e`.
impl Default for Ctxt {
    fn default() -> Self {
        Self {
            vars: CONSTANTS
                .iter()
                .map(|(name, value)| (name.to_string(), *value))
                .collect(),
        }
    }
}

impl Ctxt {
    /// Creates a new context with the default constants and the given variables. A variable with
    /// the same name as a constant replaces the constant.
    pub fn with_bindings(bindings: &HashMap<String, f64>) -> Self {
        let mut ctxt = Self::default();
        ctxt.vars.extend(bindings.iter().map(|(name, value)| (name.clone(), *value)));
        ctxt
    }

    /// Add a variable to the context.
    pub fn add_var(&mut self, name: &str, value: f64) {
        self.vars.insert(name.to_string(), value);
    }

    /// Get the value of a variable in the context.
    pub fn get_var(&self, name: &str) -> Option<f64> {
        self.vars.get(name).copied()
    }
}
