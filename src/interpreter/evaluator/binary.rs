use crate::{
    ast::{BinaryOperator, Node},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::Value,
    },
};

/// `+ - * / % ^` across the value kinds.
pub mod arithmetic;
/// `== != < <= > >=` across the value kinds.
pub mod comparison;

impl Evaluator<'_> {
    /// Evaluates a binary node.
    ///
    /// Assignments never evaluate their left side as a value, so they are
    /// peeled off before the operands are computed; everything else
    /// evaluates both sides eagerly (including `and`/`or`, which do not
    /// short-circuit) and dispatches on the operand kinds.
    pub(crate) fn eval_binary_node(&mut self,
                                   op: BinaryOperator,
                                   lhs: &Node,
                                   rhs: &Node)
                                   -> EvalResult<Value> {
        if op.is_assignment() {
            return self.eval_assignment(op, lhs, rhs);
        }

        let left = self.eval(lhs)?;
        let right = self.eval(rhs)?;
        eval_binary(op, &left, &right)
    }

    /// Evaluates `=` and the compound assignments.
    ///
    /// A compound assignment reads the left side, applies its base operator
    /// and binds the result; the bound value is also the value of the whole
    /// expression, which is what makes chains like `a = b = 2` work.
    fn eval_assignment(&mut self,
                       op: BinaryOperator,
                       lhs: &Node,
                       rhs: &Node)
                       -> EvalResult<Value> {
        let value = match op.base_operator() {
            None => self.eval(rhs)?,
            Some(base) => {
                let left = self.eval(lhs)?;
                let right = self.eval(rhs)?;
                eval_binary(base, &left, &right)?
            },
        };

        let Node::Variable(name) = lhs else {
            return Err(RuntimeError::AssignmentTarget);
        };
        self.set_variable(name, value.clone());
        Ok(value)
    }
}

/// Applies a non-assignment binary operator to two evaluated operands.
pub(crate) fn eval_binary(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
    match op {
        BinaryOperator::Add => arithmetic::add(left, right),
        BinaryOperator::Sub => arithmetic::subtract(left, right),
        BinaryOperator::Mul => arithmetic::multiply(left, right),
        BinaryOperator::Div => arithmetic::divide(left, right),
        BinaryOperator::Mod => arithmetic::modulo(left, right),
        BinaryOperator::Pow => arithmetic::power(left, right),

        BinaryOperator::Equal
        | BinaryOperator::NotEqual
        | BinaryOperator::Less
        | BinaryOperator::LessEqual
        | BinaryOperator::Greater
        | BinaryOperator::GreaterEqual => comparison::compare(op, left, right),

        BinaryOperator::And => Ok(Value::from(left.is_truthy() && right.is_truthy())),
        BinaryOperator::Or => Ok(Value::from(left.is_truthy() || right.is_truthy())),

        _ => unreachable!("assignment operators are dispatched before operand evaluation"),
    }
}
