use crate::numerical::funcs::Domain;
use thiserror::Error;

/// The reason an expression could not be evaluated to a real number.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// The expression failed to parse, so there is nothing to evaluate.
    #[error("the expression is not valid")]
    Invalid,

    /// A variable has no value in the context.
    #[error("the variable `{name}` has no value")]
    UndefinedVariable {
        /// The name of the variable.
        name: String,
    },

    /// A function with this name does not exist.
    #[error("the `{name}` function does not exist")]
    UndefinedFunction {
        /// The name of the function.
        name: String,
    },

    /// A function was called with the wrong number of arguments.
    #[error("the `{name}` function takes 1 argument, but {given} were given")]
    WrongArity {
        /// The name of the function.
        name: String,

        /// The number of arguments given.
        given: usize,
    },

    /// A function was called with an argument outside of its domain.
    #[error("the `{name}` function is only defined for {domain}, but got {arg}")]
    Domain {
        /// The name of the function.
        name: &'static str,

        /// The argument that was given.
        arg: f64,

        /// The domain of the function.
        domain: Domain,
    },

    /// Zero was raised to a negative power.
    #[error("division by zero")]
    DivisionByZero,

    /// A power has no real value, such as `(-8)^0.5`.
    #[error("`{base}^{exp}` is not a real number")]
    NonReal {
        /// The base of the power.
        base: f64,

        /// The exponent of the power.
        exp: f64,
    },

    /// An operation produced an undefined result, such as `inf - inf`.
    #[error("the result is undefined")]
    Undefined,
}
