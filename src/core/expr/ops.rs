//! Operator overloading for expressions.

use std::ops::{Add, Div, Mul, Neg, Sub};

use super::Expr;

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $ctor:path) => {
        impl $trait for Expr {
            type Output = Expr;
            fn $method(self, rhs: Expr) -> Expr {
                $ctor(self, rhs)
            }
        }

        impl $trait<&Expr> for &Expr {
            type Output = Expr;
            fn $method(self, rhs: &Expr) -> Expr {
                $ctor(self.clone(), rhs.clone())
            }
        }

        impl $trait<i64> for Expr {
            type Output = Expr;
            fn $method(self, rhs: i64) -> Expr {
                $ctor(self, Expr::integer(rhs))
            }
        }

        impl $trait<Expr> for i64 {
            type Output = Expr;
            fn $method(self, rhs: Expr) -> Expr {
                $ctor(Expr::integer(self), rhs)
            }
        }
    };
}

impl_binary_op!(Add, add, Expr::add_expr);
impl_binary_op!(Sub, sub, Expr::sub_expr);
impl_binary_op!(Mul, mul, Expr::mul_expr);
impl_binary_op!(Div, div, Expr::div_expr);

impl Neg for Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        Expr::negate(self)
    }
}

impl Neg for &Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        Expr::negate(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_operands() {
        let x = Expr::symbol("x");
        assert_eq!(2 * x.clone(), Expr::integer(2) * x.clone());
        assert_eq!(x.clone() - 1, x.clone() + Expr::integer(-1));
        assert_eq!(-(-x.clone()), x);
    }

    #[test]
    fn test_reference_operands() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        assert_eq!(&x * &y, x.clone() * y.clone());
        assert_eq!(&x / &x, Expr::one());
    }
}
