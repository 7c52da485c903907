//! Numeric pipelines: a textual list of steps such as `add:1 mul:2 neg`
//! compiled into one composed [`ThrowingUnaryOperator`].
//!
//! Every step is validated while parsing, so a malformed pipeline is
//! rejected before any value flows through it.

use crate::error::{FnError, Result};
use crate::prim::{CacheKey, Primitive};
use crate::throwing::{ThrowingFunction, ThrowingUnaryOperator};
use clap::ValueEnum;
use itertools::Itertools;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

static STEP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<name>[a-z]+)(?::(?P<operand>\S+))?$").expect("step pattern is valid")
});

/// Arithmetic available to pipeline steps.
///
/// Integer operations are checked: overflow and division by zero fail.
/// Floating point operations follow IEEE semantics and never fail.
pub trait Arith: Primitive + CacheKey + PartialOrd + fmt::Display {
    fn parse_value(text: &str) -> Option<Self>;
    fn add(self, rhs: Self) -> Result<Self>;
    fn sub(self, rhs: Self) -> Result<Self>;
    fn mul(self, rhs: Self) -> Result<Self>;
    fn div(self, rhs: Self) -> Result<Self>;
    fn rem(self, rhs: Self) -> Result<Self>;
    fn neg(self) -> Result<Self>;
    fn abs(self) -> Result<Self>;
}

fn overflow<T: Primitive>(op: &str) -> FnError {
    FnError::Arithmetic(format!("{} overflow in {}", T::KIND, op))
}

macro_rules! integer_arith {
    ($($t:ty),*) => {
        $(
            impl Arith for $t {
                fn parse_value(text: &str) -> Option<Self> {
                    text.parse().ok()
                }

                fn add(self, rhs: Self) -> Result<Self> {
                    self.checked_add(rhs).ok_or_else(|| overflow::<$t>("add"))
                }

                fn sub(self, rhs: Self) -> Result<Self> {
                    self.checked_sub(rhs).ok_or_else(|| overflow::<$t>("sub"))
                }

                fn mul(self, rhs: Self) -> Result<Self> {
                    self.checked_mul(rhs).ok_or_else(|| overflow::<$t>("mul"))
                }

                fn div(self, rhs: Self) -> Result<Self> {
                    if rhs == 0 {
                        return Err(FnError::Arithmetic("division by zero".to_string()));
                    }
                    self.checked_div(rhs).ok_or_else(|| overflow::<$t>("div"))
                }

                fn rem(self, rhs: Self) -> Result<Self> {
                    if rhs == 0 {
                        return Err(FnError::Arithmetic("division by zero".to_string()));
                    }
                    self.checked_rem(rhs).ok_or_else(|| overflow::<$t>("rem"))
                }

                fn neg(self) -> Result<Self> {
                    self.checked_neg().ok_or_else(|| overflow::<$t>("neg"))
                }

                fn abs(self) -> Result<Self> {
                    self.checked_abs().ok_or_else(|| overflow::<$t>("abs"))
                }
            }
        )*
    };
}

macro_rules! float_arith {
    ($($t:ty),*) => {
        $(
            impl Arith for $t {
                fn parse_value(text: &str) -> Option<Self> {
                    text.parse().ok()
                }

                fn add(self, rhs: Self) -> Result<Self> {
                    Ok(self + rhs)
                }

                fn sub(self, rhs: Self) -> Result<Self> {
                    Ok(self - rhs)
                }

                fn mul(self, rhs: Self) -> Result<Self> {
                    Ok(self * rhs)
                }

                fn div(self, rhs: Self) -> Result<Self> {
                    Ok(self / rhs)
                }

                fn rem(self, rhs: Self) -> Result<Self> {
                    Ok(self % rhs)
                }

                fn neg(self) -> Result<Self> {
                    Ok(-self)
                }

                fn abs(self) -> Result<Self> {
                    Ok(<$t>::abs(self))
                }
            }
        )*
    };
}

integer_arith!(i8, i16, i32, i64);
float_arith!(f32, f64);

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, ValueEnum)]
pub enum StepKind {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Neg,
    Abs,
    Sq,
    Min,
    Max,
}

impl StepKind {
    pub fn takes_operand(&self) -> bool {
        !matches!(self, StepKind::Neg | StepKind::Abs | StepKind::Sq)
    }

    pub fn name(&self) -> &'static str {
        match self {
            StepKind::Add => "add",
            StepKind::Sub => "sub",
            StepKind::Mul => "mul",
            StepKind::Div => "div",
            StepKind::Rem => "rem",
            StepKind::Neg => "neg",
            StepKind::Abs => "abs",
            StepKind::Sq => "sq",
            StepKind::Min => "min",
            StepKind::Max => "max",
        }
    }
}

impl FromStr for StepKind {
    type Err = FnError;

    fn from_str(name: &str) -> Result<Self> {
        <StepKind as ValueEnum>::from_str(name, false)
            .map_err(|_| FnError::invalid_argument(format!("unknown step '{}'", name)))
    }
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Step<T> {
    kind: StepKind,
    operand: Option<T>,
}

impl<T: Arith> Step<T> {
    pub fn new(kind: StepKind, operand: Option<T>) -> Result<Self> {
        match (kind.takes_operand(), operand.is_some()) {
            (true, false) => Err(FnError::invalid_argument(format!(
                "step '{}' needs an operand",
                kind.name()
            ))),
            (false, true) => Err(FnError::invalid_argument(format!(
                "step '{}' takes no operand",
                kind.name()
            ))),
            _ => Ok(Step { kind, operand }),
        }
    }

    /// Parses `name` or `name:operand`.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        let caps = STEP_RE
            .captures(text)
            .ok_or_else(|| FnError::invalid_argument(format!("malformed step '{}'", text)))?;
        let kind: StepKind = caps["name"].parse()?;
        let operand = match caps.name("operand") {
            Some(m) => Some(T::parse_value(m.as_str()).ok_or_else(|| {
                FnError::invalid_argument(format!(
                    "'{}' is not a valid {} operand",
                    m.as_str(),
                    T::KIND
                ))
            })?),
            None => None,
        };
        Step::new(kind, operand)
    }

    pub fn kind(&self) -> StepKind {
        self.kind
    }

    pub fn eval(&self, x: T) -> Result<T> {
        // operands are checked in `new`
        let y = || self.operand.ok_or_else(|| FnError::invalid_argument("missing operand"));
        match self.kind {
            StepKind::Add => x.add(y()?),
            StepKind::Sub => x.sub(y()?),
            StepKind::Mul => x.mul(y()?),
            StepKind::Div => x.div(y()?),
            StepKind::Rem => x.rem(y()?),
            StepKind::Neg => x.neg(),
            StepKind::Abs => x.abs(),
            StepKind::Sq => x.mul(x),
            StepKind::Min => {
                let y = y()?;
                Ok(if y < x { y } else { x })
            }
            StepKind::Max => {
                let y = y()?;
                Ok(if y > x { y } else { x })
            }
        }
    }

    pub fn to_operator(self) -> ThrowingUnaryOperator<T, FnError> {
        ThrowingFunction::new(move |x| self.eval(x))
    }
}

impl<T: fmt::Display> fmt::Display for Step<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.operand {
            Some(operand) => write!(f, "{}:{}", self.kind.name(), operand),
            None => write!(f, "{}", self.kind.name()),
        }
    }
}

/// Parses whitespace separated steps; each element may hold several.
pub fn parse_steps<T: Arith, S: AsRef<str>>(steps: &[S]) -> Result<Vec<Step<T>>> {
    steps
        .iter()
        .flat_map(|s| s.as_ref().split_whitespace())
        .map(Step::parse)
        .collect()
}

/// Reads whitespace separated steps from a file; `#` starts a comment.
pub fn read_steps<T: Arith>(path: &Path) -> Result<Vec<Step<T>>> {
    let content = fs::read_to_string(path).map_err(|source| FnError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let lines: Vec<&str> = content
        .lines()
        .map(|line| line.split('#').next().unwrap_or(""))
        .collect();
    parse_steps(&lines)
}

/// A validated list of steps and the operator composed from them.
#[derive(Clone)]
pub struct Pipeline<T> {
    steps: Vec<Step<T>>,
    operator: ThrowingUnaryOperator<T, FnError>,
}

impl<T: Arith> Pipeline<T> {
    pub fn parse<S: AsRef<str>>(steps: &[S]) -> Result<Self> {
        Self::from_steps(parse_steps(steps)?)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        Self::from_steps(read_steps(path)?)
    }

    pub fn from_steps(steps: Vec<Step<T>>) -> Result<Self> {
        let operator = steps
            .iter()
            .map(|step| step.to_operator())
            .reduce(|acc, next| acc.and_then(next))
            .ok_or_else(|| FnError::invalid_argument("a pipeline needs at least one step"))?;
        let pipeline = Pipeline { steps, operator };
        debug!("{} pipeline: {}", T::KIND, pipeline);
        Ok(pipeline)
    }

    pub fn steps(&self) -> &[Step<T>] {
        &self.steps
    }

    pub fn operator(&self) -> &ThrowingUnaryOperator<T, FnError> {
        &self.operator
    }

    pub fn eval(&self, x: T) -> Result<T> {
        self.operator.try_apply(x)
    }

    /// Replaces the operator by its memoized form.
    pub fn memoize(&mut self) {
        self.operator = self.operator.memoize();
    }
}

impl<T: fmt::Display> fmt::Display for Pipeline<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.steps.iter().join(" | "))
    }
}

impl<T> fmt::Debug for Pipeline<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("steps", &self.to_string())
            .field("memoized", &self.operator.is_memoized())
            .finish()
    }
}
