use num_bigint::BigInt as BigIntData;
use num_traits::{Signed, ToPrimitive, Zero};

use crate::{
    ecmascript::{
        execution::agent::{Agent, ExceptionType, JsResult},
        types::language::string::String,
    },
    heap::{indexes::BigIntIndex, CreateHeapData},
};

/// ### [6.1.6.2 The BigInt Type](https://tc39.es/ecma262/#sec-ecmascript-language-types-bigint-type)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct BigInt(pub(crate) BigIntIndex);

#[derive(Debug, Clone)]
pub struct BigIntHeapData {
    pub(crate) data: BigIntData,
}

impl From<BigIntIndex> for BigInt {
    fn from(value: BigIntIndex) -> Self {
        BigInt(value)
    }
}

impl BigInt {
    pub(crate) const fn get_index(self) -> usize {
        self.0.into_index()
    }

    pub(crate) fn from_i64(agent: &mut Agent, value: i64) -> BigInt {
        agent.heap.create(BigIntHeapData {
            data: BigIntData::from(value),
        })
    }

    pub(crate) fn from_data(agent: &mut Agent, data: BigIntData) -> BigInt {
        agent.heap.create(BigIntHeapData { data })
    }

    pub(crate) fn is_zero(self, agent: &Agent) -> bool {
        agent[self].data.is_zero()
    }

    /// ### [6.1.6.2.1 BigInt::unaryMinus ( x )](https://tc39.es/ecma262/#sec-numeric-types-bigint-unaryMinus)
    pub(crate) fn unary_minus(agent: &mut Agent, x: BigInt) -> BigInt {
        let data = -&agent[x].data;
        BigInt::from_data(agent, data)
    }

    /// ### [6.1.6.2.2 BigInt::bitwiseNOT ( x )](https://tc39.es/ecma262/#sec-numeric-types-bigint-bitwiseNOT)
    pub(crate) fn bitwise_not(agent: &mut Agent, x: BigInt) -> BigInt {
        let data = -&agent[x].data - 1;
        BigInt::from_data(agent, data)
    }

    /// ### [6.1.6.2.7 BigInt::add ( x, y )](https://tc39.es/ecma262/#sec-numeric-types-bigint-add)
    pub(crate) fn add(agent: &mut Agent, x: BigInt, y: BigInt) -> BigInt {
        let data = &agent[x].data + &agent[y].data;
        BigInt::from_data(agent, data)
    }

    /// ### [6.1.6.2.8 BigInt::subtract ( x, y )](https://tc39.es/ecma262/#sec-numeric-types-bigint-subtract)
    pub(crate) fn subtract(agent: &mut Agent, x: BigInt, y: BigInt) -> BigInt {
        let data = &agent[x].data - &agent[y].data;
        BigInt::from_data(agent, data)
    }

    /// ### [6.1.6.2.4 BigInt::multiply ( x, y )](https://tc39.es/ecma262/#sec-numeric-types-bigint-multiply)
    pub(crate) fn multiply(agent: &mut Agent, x: BigInt, y: BigInt) -> BigInt {
        let data = &agent[x].data * &agent[y].data;
        BigInt::from_data(agent, data)
    }

    /// ### [6.1.6.2.5 BigInt::divide ( x, y )](https://tc39.es/ecma262/#sec-numeric-types-bigint-divide)
    pub(crate) fn divide(agent: &mut Agent, x: BigInt, y: BigInt) -> JsResult<BigInt> {
        if agent[y].data.is_zero() {
            return Err(agent
                .throw_exception_with_static_message(ExceptionType::RangeError, "Division by zero"));
        }
        let data = &agent[x].data / &agent[y].data;
        Ok(BigInt::from_data(agent, data))
    }

    /// ### [6.1.6.2.6 BigInt::remainder ( n, d )](https://tc39.es/ecma262/#sec-numeric-types-bigint-remainder)
    pub(crate) fn remainder(agent: &mut Agent, n: BigInt, d: BigInt) -> JsResult<BigInt> {
        if agent[d].data.is_zero() {
            return Err(agent
                .throw_exception_with_static_message(ExceptionType::RangeError, "Division by zero"));
        }
        let data = &agent[n].data % &agent[d].data;
        Ok(BigInt::from_data(agent, data))
    }

    /// ### [6.1.6.2.3 BigInt::exponentiate ( base, exponent )](https://tc39.es/ecma262/#sec-numeric-types-bigint-exponentiate)
    pub(crate) fn exponentiate(agent: &mut Agent, base: BigInt, exponent: BigInt) -> JsResult<BigInt> {
        if agent[exponent].data.is_negative() {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::RangeError,
                "Exponent must be non-negative",
            ));
        }
        let Some(exponent) = agent[exponent].data.to_u32() else {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::RangeError,
                "Exponent over bounds",
            ));
        };
        let data = agent[base].data.pow(exponent);
        Ok(BigInt::from_data(agent, data))
    }

    /// ### [6.1.6.2.12 BigInt::lessThan ( x, y )](https://tc39.es/ecma262/#sec-numeric-types-bigint-lessThan)
    pub(crate) fn less_than(agent: &Agent, x: BigInt, y: BigInt) -> bool {
        agent[x].data < agent[y].data
    }

    /// ### [6.1.6.2.13 BigInt::equal ( x, y )](https://tc39.es/ecma262/#sec-numeric-types-bigint-equal)
    pub(crate) fn equal(agent: &Agent, x: BigInt, y: BigInt) -> bool {
        agent[x].data == agent[y].data
    }

    /// BigInt::toString with radix 10.
    pub(crate) fn to_string(self, agent: &mut Agent) -> String {
        let text = agent[self].data.to_string();
        String::from_string(agent, text)
    }

    /// Comparison against a Number value, used by IsLooselyEqual and the
    /// relational operators.
    pub(crate) fn compare_with_f64(agent: &Agent, x: BigInt, y: f64) -> Option<core::cmp::Ordering> {
        if y.is_nan() {
            return None;
        }
        if y == f64::INFINITY {
            return Some(core::cmp::Ordering::Less);
        }
        if y == f64::NEG_INFINITY {
            return Some(core::cmp::Ordering::Greater);
        }
        let data = &agent[x].data;
        let y_big: BigIntData = num_traits::FromPrimitive::from_f64(y.trunc())
            .expect("finite float must convert to BigInt");
        let ord = data.cmp(&y_big);
        if ord == core::cmp::Ordering::Equal {
            let fract = y.fract();
            if fract > 0.0 {
                return Some(core::cmp::Ordering::Less);
            } else if fract < 0.0 {
                return Some(core::cmp::Ordering::Greater);
            }
        }
        Some(ord)
    }
}

impl core::ops::Index<BigInt> for Agent {
    type Output = BigIntHeapData;

    fn index(&self, index: BigInt) -> &Self::Output {
        self.heap
            .bigints
            .get(index.get_index())
            .expect("BigInt out of bounds")
            .as_ref()
            .expect("BigInt slot empty")
    }
}
