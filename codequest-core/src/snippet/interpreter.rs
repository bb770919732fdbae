use crate::snippet::parser::{BinOp, Expr, FnDef, Stmt, UnaryOp};
use crate::snippet::SnippetError;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Maximum statements and loop iterations per run
pub const MAX_STEPS: usize = 10_000;

/// Maximum nested function calls
pub const MAX_DEPTH: usize = 64;

/// Longest string a program may build, in bytes
pub const MAX_STRING_LEN: usize = 64 * 1024;

/// Most printed text a program may produce, in bytes
pub const MAX_OUTPUT_LEN: usize = 64 * 1024;

/// Deepest evaluator recursion across calls, statements and expressions
const MAX_FRAMES: usize = 512;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Str(String),
    Bool(bool),
    Unit,
}

impl Value {
    fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "number",
            Value::Str(_) => "string",
            Value::Bool(_) => "boolean",
            Value::Unit => "nothing",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{}", value),
            Value::Str(text) => write!(f, "{}", text),
            Value::Bool(value) => write!(f, "{}", value),
            Value::Unit => write!(f, "()"),
        }
    }
}

enum Flow {
    Next,
    Return(Value),
}

fn runtime<T>(message: impl Into<String>) -> Result<T, SnippetError> {
    Err(SnippetError::Runtime(message.into()))
}

/// Tree-walking evaluator with a step budget and captured output
pub struct Interpreter {
    scopes: Vec<HashMap<String, Value>>,
    functions: HashMap<String, Rc<FnDef>>,
    output: Vec<String>,
    output_len: usize,
    steps: usize,
    depth: usize,
    frames: usize,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self {
            scopes: vec![HashMap::new()],
            functions: HashMap::new(),
            output: Vec::new(),
            output_len: 0,
            steps: 0,
            depth: 0,
            frames: 0,
        }
    }

    /// Run a whole program and return the printed lines
    pub fn run(mut self, program: &[Stmt]) -> Result<Vec<String>, SnippetError> {
        // Top-level functions may be called before their definition
        for stmt in program {
            if let Stmt::Fn(def) = stmt {
                self.functions.insert(def.name.clone(), Rc::clone(def));
            }
        }
        self.exec_block(program)?;
        Ok(self.output)
    }

    fn tick(&mut self) -> Result<(), SnippetError> {
        self.steps += 1;
        if self.steps > MAX_STEPS {
            return Err(SnippetError::StepLimit(MAX_STEPS));
        }
        Ok(())
    }

    fn framed<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, SnippetError>,
    ) -> Result<T, SnippetError> {
        if self.frames >= MAX_FRAMES {
            return runtime("too much recursion");
        }
        self.frames += 1;
        let result = f(self);
        self.frames -= 1;
        result
    }

    fn lookup(&self, name: &str) -> Result<Value, SnippetError> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name))
            .cloned()
            .ok_or_else(|| SnippetError::Runtime(format!("'{}' is not defined", name)))
    }

    fn assign(&mut self, name: &str, value: Value) -> Result<(), SnippetError> {
        match self
            .scopes
            .iter_mut()
            .rev()
            .find_map(|scope| scope.get_mut(name))
        {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => runtime(format!("'{}' is not defined, use 'let' first", name)),
        }
    }

    fn declare(&mut self, name: &str, value: Value) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), value);
        }
    }

    fn scoped<F>(&mut self, f: F) -> Result<Flow, SnippetError>
    where
        F: FnOnce(&mut Self) -> Result<Flow, SnippetError>,
    {
        self.scopes.push(HashMap::new());
        let result = f(self);
        self.scopes.pop();
        result
    }

    fn exec_block(&mut self, stmts: &[Stmt]) -> Result<Flow, SnippetError> {
        for stmt in stmts {
            if let Flow::Return(value) = self.exec(stmt)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Next)
    }

    fn exec(&mut self, stmt: &Stmt) -> Result<Flow, SnippetError> {
        self.tick()?;
        self.framed(|this| this.exec_stmt(stmt))
    }

    fn exec_stmt(&mut self, stmt: &Stmt) -> Result<Flow, SnippetError> {
        match stmt {
            Stmt::Let { name, value } => {
                let value = self.eval(value)?;
                self.declare(name, value);
            }
            Stmt::Assign { name, value } => {
                let value = self.eval(value)?;
                self.assign(name, value)?;
            }
            Stmt::Expr(expr) => {
                self.eval(expr)?;
            }
            Stmt::For {
                var,
                start,
                end,
                body,
            } => {
                let start = self.int(start, "range start")?;
                let end = self.int(end, "range end")?;
                for i in start..end {
                    self.tick()?;
                    let flow = self.scoped(|this| {
                        this.declare(var, Value::Int(i));
                        this.exec_block(body)
                    })?;
                    if let Flow::Return(value) = flow {
                        return Ok(Flow::Return(value));
                    }
                }
            }
            Stmt::While { cond, body } => {
                while self.condition(cond)? {
                    self.tick()?;
                    if let Flow::Return(value) = self.scoped(|this| this.exec_block(body))? {
                        return Ok(Flow::Return(value));
                    }
                }
            }
            Stmt::If {
                cond,
                then,
                otherwise,
            } => {
                if self.condition(cond)? {
                    return self.scoped(|this| this.exec_block(then));
                } else if let Some(otherwise) = otherwise {
                    return self.scoped(|this| this.exec_block(otherwise));
                }
            }
            Stmt::Fn(def) => {
                self.functions.insert(def.name.clone(), Rc::clone(def));
            }
            Stmt::Return(value) => {
                let value = match value {
                    Some(expr) => self.eval(expr)?,
                    None => Value::Unit,
                };
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Next)
    }

    fn int(&mut self, expr: &Expr, what: &str) -> Result<i64, SnippetError> {
        match self.eval(expr)? {
            Value::Int(value) => Ok(value),
            other => runtime(format!("{} must be a number, got {}", what, other.type_name())),
        }
    }

    fn condition(&mut self, expr: &Expr) -> Result<bool, SnippetError> {
        match self.eval(expr)? {
            Value::Bool(value) => Ok(value),
            other => runtime(format!(
                "condition must be true or false, got {}",
                other.type_name()
            )),
        }
    }

    fn eval(&mut self, expr: &Expr) -> Result<Value, SnippetError> {
        self.framed(|this| this.eval_expr(expr))
    }

    fn eval_expr(&mut self, expr: &Expr) -> Result<Value, SnippetError> {
        match expr {
            Expr::Int(value) => Ok(Value::Int(*value)),
            Expr::Str(text) => Ok(Value::Str(text.clone())),
            Expr::Bool(value) => Ok(Value::Bool(*value)),
            Expr::Var(name) => self.lookup(name),
            Expr::Unary { op, expr } => match (op, self.eval(expr)?) {
                (UnaryOp::Neg, Value::Int(value)) => value
                    .checked_neg()
                    .map(Value::Int)
                    .ok_or_else(|| SnippetError::Runtime("number overflow".to_string())),
                (UnaryOp::Not, Value::Bool(value)) => Ok(Value::Bool(!value)),
                (UnaryOp::Neg, other) => runtime(format!("cannot negate {}", other.type_name())),
                (UnaryOp::Not, other) => runtime(format!("cannot apply '!' to {}", other.type_name())),
            },
            Expr::Binary { op, left, right } => match op {
                BinOp::And => Ok(Value::Bool(
                    self.condition(left)? && self.condition(right)?,
                )),
                BinOp::Or => Ok(Value::Bool(
                    self.condition(left)? || self.condition(right)?,
                )),
                _ => {
                    let left = self.eval(left)?;
                    let right = self.eval(right)?;
                    binary(*op, left, right)
                }
            },
            Expr::Call { name, args } => {
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(self.eval(arg)?);
                }
                self.call(name, values)
            }
        }
    }

    fn call(&mut self, name: &str, args: Vec<Value>) -> Result<Value, SnippetError> {
        match name {
            "print" => {
                let line = args
                    .iter()
                    .map(Value::to_string)
                    .collect::<Vec<_>>()
                    .join(" ");
                self.output_len += line.len() + 1;
                if self.output_len > MAX_OUTPUT_LEN {
                    return runtime("too much output");
                }
                self.output.push(line);
                return Ok(Value::Unit);
            }
            "len" => {
                return match args.as_slice() {
                    [Value::Str(text)] => Ok(Value::Int(text.chars().count() as i64)),
                    [other] => runtime(format!("len() expects a string, got {}", other.type_name())),
                    _ => runtime("len() takes exactly one argument"),
                };
            }
            "str" => {
                return match args.as_slice() {
                    [value] => Ok(Value::Str(value.to_string())),
                    _ => runtime("str() takes exactly one argument"),
                };
            }
            _ => {}
        }

        let Some(def) = self.functions.get(name).cloned() else {
            return runtime(format!("function '{}' is not defined", name));
        };
        if def.params.len() != args.len() {
            return runtime(format!(
                "{}() takes {} argument(s) but {} were given",
                def.name,
                def.params.len(),
                args.len()
            ));
        }
        if self.depth >= MAX_DEPTH {
            return runtime("too much recursion");
        }

        self.depth += 1;
        // Functions see globals and their own parameters, not the caller's locals
        let saved = self.scopes.split_off(1);
        let flow = self.scoped(|this| {
            for (param, value) in def.params.iter().zip(args) {
                this.declare(param, value);
            }
            this.exec_block(&def.body)
        });
        self.scopes.extend(saved);
        self.depth -= 1;

        match flow? {
            Flow::Return(value) => Ok(value),
            Flow::Next => Ok(Value::Unit),
        }
    }
}

fn binary(op: BinOp, left: Value, right: Value) -> Result<Value, SnippetError> {
    let overflow = || SnippetError::Runtime("number overflow".to_string());
    match (op, left, right) {
        (BinOp::Add, Value::Int(a), Value::Int(b)) => a.checked_add(b).map(Value::Int).ok_or_else(overflow),
        (BinOp::Add, Value::Str(a), b) => concat(a, &b.to_string()),
        (BinOp::Add, a, Value::Str(b)) => concat(a.to_string(), &b),
        (BinOp::Sub, Value::Int(a), Value::Int(b)) => a.checked_sub(b).map(Value::Int).ok_or_else(overflow),
        (BinOp::Mul, Value::Int(a), Value::Int(b)) => a.checked_mul(b).map(Value::Int).ok_or_else(overflow),
        (BinOp::Div | BinOp::Rem, Value::Int(_), Value::Int(0)) => runtime("division by zero"),
        (BinOp::Div, Value::Int(a), Value::Int(b)) => a.checked_div(b).map(Value::Int).ok_or_else(overflow),
        (BinOp::Rem, Value::Int(a), Value::Int(b)) => a.checked_rem(b).map(Value::Int).ok_or_else(overflow),
        (BinOp::Eq, a, b) => Ok(Value::Bool(a == b)),
        (BinOp::NotEq, a, b) => Ok(Value::Bool(a != b)),
        (BinOp::Lt | BinOp::Gt | BinOp::Le | BinOp::Ge, Value::Int(a), Value::Int(b)) => {
            Ok(Value::Bool(compare(op, a.cmp(&b))))
        }
        (BinOp::Lt | BinOp::Gt | BinOp::Le | BinOp::Ge, Value::Str(a), Value::Str(b)) => {
            Ok(Value::Bool(compare(op, a.cmp(&b))))
        }
        (op, a, b) => runtime(format!(
            "cannot apply {:?} to {} and {}",
            op,
            a.type_name(),
            b.type_name()
        )),
    }
}

fn concat(mut left: String, right: &str) -> Result<Value, SnippetError> {
    if left.len() + right.len() > MAX_STRING_LEN {
        return runtime("string too long");
    }
    left.push_str(right);
    Ok(Value::Str(left))
}

fn compare(op: BinOp, ordering: std::cmp::Ordering) -> bool {
    use std::cmp::Ordering::*;
    match op {
        BinOp::Lt => ordering == Less,
        BinOp::Gt => ordering == Greater,
        BinOp::Le => ordering != Greater,
        BinOp::Ge => ordering != Less,
        _ => false,
    }
}
