use crate::{
    numerical::{ctxt::Ctxt, error::EvalError, funcs},
    symbolic::expr::{Primary, SymExpr},
};

/// Any type that can be evaluated to produce a real number.
pub trait Eval {
    /// Evaluate the expression to produce a value, using the given context.
    fn eval(&self, ctxt: &Ctxt) -> Result<f64, EvalError>;

    /// Evaluate the expression to produce a value, using the default context.
    fn eval_default(&self) -> Result<f64, EvalError> {
        self.eval(&Ctxt::default())
    }
}

/// Rejects `NaN` results. Infinite results are passed through.
fn defined(value: f64) -> Result<f64, EvalError> {
    if value.is_nan() {
        Err(EvalError::Undefined)
    } else {
        Ok(value)
    }
}

impl Eval for Primary {
    fn eval(&self, ctxt: &Ctxt) -> Result<f64, EvalError> {
        match self {
            Primary::Number(num) => Ok(*num),
            Primary::Symbol(name) => ctxt.get_var(name)
                .ok_or_else(|| EvalError::UndefinedVariable { name: name.clone() }),
            Primary::Call(name, args) => {
                let builtin = funcs::get(name)
                    .ok_or_else(|| EvalError::UndefinedFunction { name: name.clone() })?;
                let [arg] = args.as_slice() else {
                    return Err(EvalError::WrongArity { name: name.clone(), given: args.len() });
                };

                defined(builtin.call(arg.eval(ctxt)?)?)
            },
        }
    }
}

impl Eval for SymExpr {
    fn eval(&self, ctxt: &Ctxt) -> Result<f64, EvalError> {
        match self {
            SymExpr::Primary(primary) => primary.eval(ctxt),
            SymExpr::Add(terms) => {
                let mut sum = 0.0;
                for term in terms {
                    sum += term.eval(ctxt)?;
                }
                defined(sum)
            },
            SymExpr::Mul(factors) => {
                let mut product = 1.0;
                for factor in factors {
                    product *= factor.eval(ctxt)?;
                }
                defined(product)
            },
            SymExpr::Exp(base, exp) => {
                let (base, exp) = (base.eval(ctxt)?, exp.eval(ctxt)?);
                if base == 0.0 && exp < 0.0 {
                    return Err(EvalError::DivisionByZero);
                }

                let value = base.powf(exp);
                if value.is_nan() {
                    Err(EvalError::NonReal { base, exp })
                } else {
                    Ok(value)
                }
            },
        }
    }
}
