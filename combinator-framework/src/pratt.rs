use crate::parser::{BoxedParser, Parser};
use crate::reply::{Halt, Progress, Reply};
use common_framework::Cursor;
use std::sync::Arc;

type Unary<T> = Arc<dyn Fn(T) -> T + Send + Sync>;
type Binary<T> = Arc<dyn Fn(T, T) -> T + Send + Sync>;

struct PrefixOp<T> {
    op: BoxedParser<()>,
    r_bp: u16,
    build: Unary<T>,
}

impl<T> Clone for PrefixOp<T> {
    fn clone(&self) -> Self {
        Self {
            op: self.op.clone(),
            r_bp: self.r_bp,
            build: Arc::clone(&self.build),
        }
    }
}

struct InfixOp<T> {
    op: BoxedParser<()>,
    l_bp: u16,
    r_bp: u16,
    build: Binary<T>,
}

impl<T> Clone for InfixOp<T> {
    fn clone(&self) -> Self {
        Self {
            op: self.op.clone(),
            l_bp: self.l_bp,
            r_bp: self.r_bp,
            build: Arc::clone(&self.build),
        }
    }
}

/// An expression parser driven by binding powers.
///
/// Pratt parsing (Top-Down Operator Precedence) handles precedence with
/// numbers instead of one grammar rule per level. Operators are ordinary
/// parsers, usually [`symbol`](crate::lexer::symbol)s, tried in the order
/// they were added. A higher precedence binds tighter.
///
/// ```
/// use combinator_framework::{pratt, take_while1, literal, Parser};
///
/// let number = take_while1(|c| c.is_ascii_digit(), "number")
///     .map(|digits| digits.parse::<i64>().unwrap_or_default());
/// let expr = pratt(number)
///     .infix_left(literal("+"), 1, |a, b| a + b)
///     .infix_left(literal("*"), 2, |a, b| a * b)
///     .infix_right(literal("^"), 3, |a, b| a.pow(b as u32));
///
/// assert_eq!(expr.parse_str("1+2*3").unwrap(), 7);
/// assert_eq!(expr.parse_str("2^3^2").unwrap(), 512);
/// ```
pub struct Pratt<T> {
    atom: BoxedParser<T>,
    prefix: Vec<PrefixOp<T>>,
    infix: Vec<InfixOp<T>>,
}

impl<T> Clone for Pratt<T> {
    fn clone(&self) -> Self {
        Self {
            atom: self.atom.clone(),
            prefix: self.prefix.clone(),
            infix: self.infix.clone(),
        }
    }
}

/// Starts an expression parser over `atom`, the operand parser.
pub fn pratt<P>(atom: P) -> Pratt<P::Output>
where
    P: Parser + Send + Sync + 'static,
{
    Pratt {
        atom: atom.boxed(),
        prefix: Vec::new(),
        infix: Vec::new(),
    }
}

fn operator<O>(op: O) -> BoxedParser<()>
where
    O: Parser + Send + Sync + 'static,
{
    op.to(()).boxed()
}

impl<T: 'static> Pratt<T> {
    /// Adds a prefix operator; its operand binds at `precedence`.
    pub fn prefix<O, F>(mut self, op: O, precedence: u8, build: F) -> Self
    where
        O: Parser + Send + Sync + 'static,
        F: Fn(T) -> T + Send + Sync + 'static,
    {
        self.prefix.push(PrefixOp {
            op: operator(op),
            r_bp: 2 * u16::from(precedence) + 1,
            build: Arc::new(build),
        });
        self
    }

    /// Adds a left-associative infix operator.
    pub fn infix_left<O, F>(mut self, op: O, precedence: u8, build: F) -> Self
    where
        O: Parser + Send + Sync + 'static,
        F: Fn(T, T) -> T + Send + Sync + 'static,
    {
        let bp = 2 * u16::from(precedence);
        self.infix.push(InfixOp {
            op: operator(op),
            l_bp: bp,
            r_bp: bp + 1,
            build: Arc::new(build),
        });
        self
    }

    /// Adds a right-associative infix operator.
    pub fn infix_right<O, F>(mut self, op: O, precedence: u8, build: F) -> Self
    where
        O: Parser + Send + Sync + 'static,
        F: Fn(T, T) -> T + Send + Sync + 'static,
    {
        let bp = 2 * u16::from(precedence);
        self.infix.push(InfixOp {
            op: operator(op),
            l_bp: bp + 1,
            r_bp: bp,
            build: Arc::new(build),
        });
        self
    }
}

impl<T> Pratt<T> {
    fn parse_expr(&self, input: &Cursor, min_bp: u16) -> Reply<T> {
        let mut state = Progress::new(input);
        match self.expr(&mut state, min_bp) {
            Ok(value) => state.finish(value),
            Err(halt) => halt.into_reply(),
        }
    }

    /// Parses a "null denotation": a prefix operator and its operand, or an
    /// atom.
    fn operand(&self, state: &mut Progress) -> Result<T, Halt> {
        for prefix in &self.prefix {
            match prefix.op.parse(state.cursor()) {
                Reply::Failure {
                    error,
                    consumed: false,
                } => state.suppress(error),
                reply => {
                    state.absorb(reply)?;
                    let operand = self.parse_expr(state.cursor(), prefix.r_bp);
                    let operand = state.absorb(operand)?;
                    return Ok((prefix.build)(operand));
                }
            }
        }
        state.step(&self.atom)
    }

    fn expr(&self, state: &mut Progress, min_bp: u16) -> Result<T, Halt> {
        // 1. Parse the prefix part (nud)
        let mut left = self.operand(state)?;

        loop {
            // 2. Look ahead for an infix operator
            let mut found = None;
            for infix in &self.infix {
                match infix.op.parse(state.cursor()) {
                    Reply::Failure {
                        error,
                        consumed: false,
                    } => state.suppress(error),
                    reply => {
                        found = Some((infix, reply));
                        break;
                    }
                }
            }
            let Some((infix, reply)) = found else {
                break;
            };

            // 3. If the operator binds less tightly than our context, stop
            // before it.
            if reply.is_success() && infix.l_bp < min_bp {
                break;
            }

            // 4. Consume the operator and parse the right-hand side (led)
            state.absorb(reply)?;
            let right = self.parse_expr(state.cursor(), infix.r_bp);
            let right = state.absorb(right)?;
            left = (infix.build)(left, right);
        }

        Ok(left)
    }
}

impl<T> Parser for Pratt<T> {
    type Output = T;

    fn parse(&self, input: &Cursor) -> Reply<T> {
        self.parse_expr(input, 0)
    }
}
