//! Tree‑walking evaluator.
//!
//! Statements return a [`Flow`] signal on the success channel so `return`
//! never travels through the error type; runtime errors travel through
//! [`LoxError::Runtime`] and abort the current top‑level batch.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::io::{self, Write};
use std::rc::Rc;

use chrono::Utc;
use log::{debug, info};

use crate::callable::{Callable, LoxClass, LoxFunction, NativeFunction, INITIALIZER};
use crate::environment::Environment;
use crate::error::{LoxError, Result};
use crate::expr::{Expr, ExprId, LiteralValue};
use crate::resolver::Resolver;
use crate::stmt::{FunctionDecl, Stmt};
use crate::token::{Token, TokenType};
use crate::value::Value;

/// How a statement finished.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Fell off the end; keep going.
    Normal,

    /// A `return` is unwinding to the nearest function call.
    Return(Value),
}

pub struct Interpreter {
    globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    /// Resolver output: expression id → number of frames to skip.
    locals: HashMap<ExprId, usize>,
    /// Top‑level names whose declaration has executed, plus natives.
    defined_globals: HashSet<String>,
    output: Box<dyn Write>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

fn clock(_args: &[Value]) -> Value {
    let millis: i64 = Utc::now().timestamp_millis();

    Value::Number(millis as f64 / 1000.0)
}

impl Interpreter {
    /// An interpreter printing to stdout.
    pub fn new() -> Self {
        Self::with_output(Box::new(io::stdout()))
    }

    /// An interpreter whose `print` statements write to `output`.
    pub fn with_output(output: Box<dyn Write>) -> Self {
        info!("Initializing Interpreter");

        let globals = Rc::new(RefCell::new(Environment::new()));

        debug!("Defining native function 'clock'");

        globals.borrow_mut().define(
            "clock",
            Value::Native(Rc::new(NativeFunction {
                name: "clock",
                arity: 0,
                func: clock,
            })),
        );

        Self {
            environment: globals.clone(),
            globals,
            locals: HashMap::new(),
            defined_globals: HashSet::from(["clock".to_string()]),
            output,
        }
    }

    /// Run the static resolver over `statements`, recording binding distances
    /// into this interpreter.  Returns every semantic error found.
    pub fn resolve(&mut self, statements: &[Stmt]) -> Vec<LoxError> {
        Resolver::new(self).resolve(statements)
    }

    /// Called by the resolver for each local reference.
    pub fn note_local(&mut self, id: ExprId, depth: usize) {
        self.locals.insert(id, depth);
    }

    /// Whether a top‑level declaration of `name` has actually run.  Names from
    /// batches that failed before reaching their declaration are absent.
    pub fn is_defined_global(&self, name: &str) -> bool {
        self.defined_globals.contains(name)
    }

    /// Bind `name` in the current frame, remembering it if that frame is the
    /// global one.
    fn define(&mut self, name: &str, value: Value) {
        if Rc::ptr_eq(&self.environment, &self.globals) {
            self.defined_globals.insert(name.to_string());
        }

        self.environment.borrow_mut().define(name, value);
    }

    /// Execute a batch of top‑level statements, stopping at the first runtime
    /// error.  The interpreter stays usable afterwards.
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<()> {
        debug!("Interpreting {} statements", statements.len());

        for stmt in statements {
            if let Err(e) = self.execute(stmt) {
                // Blocks restore their own frame, but a batch always resumes
                // at global scope.
                self.environment = self.globals.clone();
                return Err(e);
            }
        }

        self.output.flush()?;

        info!("Interpretation completed successfully");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Statements
    // ─────────────────────────────────────────────────────────────────────────

    pub fn execute(&mut self, stmt: &Stmt) -> Result<Flow> {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
                Ok(Flow::Normal)
            }

            Stmt::Print(expr) => {
                let value = self.evaluate(expr)?;
                writeln!(self.output, "{}", value)?;
                debug!("Printed value: {}", value);
                Ok(Flow::Normal)
            }

            Stmt::Var { name, initializer } => {
                let value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                self.define(&name.lexeme, value);
                Ok(Flow::Normal)
            }

            Stmt::Block(statements) => {
                let environment = Environment::with_enclosing(self.environment.clone());
                self.execute_block(statements, Rc::new(RefCell::new(environment)))
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_stmt) = else_branch {
                    self.execute(else_stmt)
                } else {
                    Ok(Flow::Normal)
                }
            }

            Stmt::While { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    if let Flow::Return(value) = self.execute(body)? {
                        return Ok(Flow::Return(value));
                    }
                }
                Ok(Flow::Normal)
            }

            Stmt::Function(declaration) => {
                debug!("Defining function '{}'", declaration.name.lexeme);

                let function =
                    LoxFunction::new(declaration.clone(), self.environment.clone(), false);
                self.define(&declaration.name.lexeme, Value::Function(Rc::new(function)));
                Ok(Flow::Normal)
            }

            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                debug!("Returning value: {}", value);
                Ok(Flow::Return(value))
            }

            Stmt::Class {
                name,
                superclass,
                methods,
            } => self.class_declaration(name, superclass.as_ref(), methods),
        }
    }

    /// Run `statements` in `environment`, restoring the previous frame however
    /// the block ends.
    pub fn execute_block(
        &mut self,
        statements: &[Stmt],
        environment: Rc<RefCell<Environment>>,
    ) -> Result<Flow> {
        let previous = std::mem::replace(&mut self.environment, environment);

        let mut result: Result<Flow> = Ok(Flow::Normal);
        for stmt in statements {
            match self.execute(stmt) {
                Ok(Flow::Normal) => {}
                other => {
                    result = other;
                    break;
                }
            }
        }

        self.environment = previous;
        result
    }

    fn class_declaration(
        &mut self,
        name: &Token,
        superclass: Option<&Expr>,
        methods: &[Rc<FunctionDecl>],
    ) -> Result<Flow> {
        debug!("Defining class '{}'", name.lexeme);

        let superclass: Option<Rc<LoxClass>> = match superclass {
            Some(expr) => match self.evaluate(expr)? {
                Value::Class(class) => Some(class),
                _ => {
                    let token = match expr {
                        Expr::Variable { name, .. } => name,
                        _ => name,
                    };
                    return Err(LoxError::runtime(token, "Superclass must be a class."));
                }
            },
            None => None,
        };

        self.define(&name.lexeme, Value::Nil);

        // Methods of a subclass close over an extra frame holding `super`.
        let method_env: Rc<RefCell<Environment>> = match &superclass {
            Some(class) => {
                let mut env = Environment::with_enclosing(self.environment.clone());
                env.define("super", Value::Class(class.clone()));
                Rc::new(RefCell::new(env))
            }
            None => self.environment.clone(),
        };

        let methods: HashMap<String, Rc<LoxFunction>> = methods
            .iter()
            .map(|decl| {
                let is_init = decl.name.lexeme == INITIALIZER;
                let function = LoxFunction::new(decl.clone(), method_env.clone(), is_init);
                (decl.name.lexeme.clone(), Rc::new(function))
            })
            .collect();

        let class = LoxClass::new(name.lexeme.clone(), superclass, methods);

        self.environment
            .borrow_mut()
            .assign(name, Value::Class(Rc::new(class)))?;

        Ok(Flow::Normal)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Expressions
    // ─────────────────────────────────────────────────────────────────────────

    pub fn evaluate(&mut self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Literal(literal) => Ok(match literal {
                LiteralValue::Number(n) => Value::Number(*n),
                LiteralValue::Str(s) => Value::String(s.clone()),
                LiteralValue::Bool(b) => Value::Bool(*b),
                LiteralValue::Nil => Value::Nil,
            }),

            Expr::Grouping(inner) => self.evaluate(inner),

            Expr::Unary { operator, right } => {
                let right = self.evaluate(right)?;

                match operator.token_type {
                    TokenType::MINUS => match right {
                        Value::Number(n) => Ok(Value::Number(-n)),
                        _ => Err(LoxError::runtime(operator, "Operand must be a number.")),
                    },
                    TokenType::BANG => Ok(Value::Bool(!right.is_truthy())),
                    _ => Err(LoxError::runtime(operator, "Invalid unary operator.")),
                }
            }

            Expr::Binary {
                left,
                operator,
                right,
            } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                binary(operator, left, right)
            }

            Expr::Logical {
                left,
                operator,
                right,
            } => {
                let left = self.evaluate(left)?;

                let short_circuit = if operator.token_type == TokenType::OR {
                    left.is_truthy()
                } else {
                    !left.is_truthy()
                };

                if short_circuit {
                    Ok(left)
                } else {
                    self.evaluate(right)
                }
            }

            Expr::Variable { id, name } => self.look_up_variable(*id, name),

            Expr::Assign { id, name, value } => {
                let value = self.evaluate(value)?;

                match self.locals.get(id) {
                    Some(&distance) => {
                        self.environment
                            .borrow_mut()
                            .assign_at(distance, name, value.clone())?;
                    }
                    None => {
                        self.globals.borrow_mut().assign(name, value.clone())?;
                    }
                }

                Ok(value)
            }

            Expr::Call {
                callee,
                paren,
                arguments,
            } => {
                let callee = self.evaluate(callee)?;

                let mut args: Vec<Value> = Vec::with_capacity(arguments.len());
                for arg in arguments {
                    args.push(self.evaluate(arg)?);
                }

                self.call_value(&callee, paren, args)
            }

            Expr::Get { object, name } => match self.evaluate(object)? {
                Value::Instance(instance) => instance.get(name),
                _ => Err(LoxError::runtime(name, "Only instances have properties.")),
            },

            Expr::Set {
                object,
                name,
                value,
            } => {
                let Value::Instance(instance) = self.evaluate(object)? else {
                    return Err(LoxError::runtime(name, "Only instances have fields."));
                };

                let value = self.evaluate(value)?;
                instance.set(name, value.clone());
                Ok(value)
            }

            Expr::This { id, keyword } => self.look_up_variable(*id, keyword),

            Expr::Super {
                id,
                keyword,
                method,
            } => self.super_method(*id, keyword, method),
        }
    }

    fn look_up_variable(&self, id: ExprId, name: &Token) -> Result<Value> {
        match self.locals.get(&id) {
            Some(&distance) => self.environment.borrow().get_at(distance, name),
            None => self.globals.borrow().get(name),
        }
    }

    /// `super.method`: find `method` above the class captured in `super`, and
    /// bind it to the `this` one frame closer.
    fn super_method(&self, id: ExprId, keyword: &Token, method: &Token) -> Result<Value> {
        let distance: usize = match self.locals.get(&id) {
            Some(&d) if d > 0 => d,
            _ => return Err(LoxError::runtime(keyword, "Unresolved 'super'.")),
        };

        let Value::Class(superclass) = self.environment.borrow().get_at(distance, keyword)? else {
            return Err(LoxError::runtime(keyword, "Superclass must be a class."));
        };

        let this = Token::synthetic("this", keyword.line);
        let Value::Instance(object) = self.environment.borrow().get_at(distance - 1, &this)? else {
            return Err(LoxError::runtime(keyword, "'this' is not an instance."));
        };

        match superclass.find_method(&method.lexeme) {
            Some(found) => Ok(Value::Function(Rc::new(found.bind(object)))),
            None => Err(LoxError::runtime(
                method,
                format!("Undefined property '{}'.", method.lexeme),
            )),
        }
    }

    fn call_value(&mut self, callee: &Value, paren: &Token, args: Vec<Value>) -> Result<Value> {
        let callable: &dyn Callable = match callee {
            Value::Native(native) => native.as_ref(),
            Value::Function(function) => function.as_ref(),
            Value::Class(class) => class,
            _ => {
                return Err(LoxError::runtime(
                    paren,
                    "Can only call functions and classes.",
                ))
            }
        };

        if args.len() != callable.arity() {
            return Err(LoxError::runtime(
                paren,
                format!(
                    "Expected {} arguments but got {}.",
                    callable.arity(),
                    args.len()
                ),
            ));
        }

        callable.call(self, args)
    }
}

/// Arithmetic, comparison and equality.  No implicit coercion.
fn binary(operator: &Token, left: Value, right: Value) -> Result<Value> {
    debug!("Binary {} on {} and {}", operator.lexeme, left, right);

    match operator.token_type {
        TokenType::EQUAL_EQUAL => return Ok(Value::Bool(left == right)),
        TokenType::BANG_EQUAL => return Ok(Value::Bool(left != right)),
        TokenType::PLUS => {
            return match (left, right) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                (Value::String(a), Value::String(b)) => Ok(Value::String(a + &b)),
                _ => Err(LoxError::runtime(
                    operator,
                    "Operands must be two numbers or two strings.",
                )),
            }
        }
        _ => {}
    }

    let (Value::Number(a), Value::Number(b)) = (left, right) else {
        return Err(LoxError::runtime(operator, "Operands must be numbers."));
    };

    match operator.token_type {
        TokenType::MINUS => Ok(Value::Number(a - b)),
        TokenType::STAR => Ok(Value::Number(a * b)),
        TokenType::SLASH => Ok(Value::Number(a / b)),
        TokenType::GREATER => Ok(Value::Bool(a > b)),
        TokenType::GREATER_EQUAL => Ok(Value::Bool(a >= b)),
        TokenType::LESS => Ok(Value::Bool(a < b)),
        TokenType::LESS_EQUAL => Ok(Value::Bool(a <= b)),
        _ => Err(LoxError::runtime(operator, "Invalid binary operator.")),
    }
}
