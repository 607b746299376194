//! Runtime support for compiled grammars.
//!
//! This module is self-contained on purpose: it is embedded into the binary
//! verbatim (see `SUPPORT` in the crate root) and shipped alongside generated
//! grammar modules, which reference its items by name. Everything a generated
//! program needs lives here: the [`Value`] sum type, the backtracking
//! [`Stream`], the [`Matcher`] combinators, deferred [`Action`]s, the dynamic
//! [`Runtime`] environment, and the [`compile_chain`] pipeline driver.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::rc::Rc;

use colored::Colorize;
use itertools::Itertools;
use log::{debug, trace};

/// A runtime value. Doubles as the item type of a [`Stream`]: character
/// streams are sequences of [`Value::Char`], and AST nodes are
/// [`Value::List`]s whose first item is a [`Value::Str`] constructor tag.
///
/// Lists are shared and interiorly mutable so the `append` builtin can grow
/// them in place; everything else is immutable.
#[derive(Clone)]
pub enum Value {
    /// The unit value, produced by empty sequences and successful lookaheads.
    None,
    /// A single character, the item type of textual input.
    Char(char),
    /// A string.
    Str(String),
    /// An integer.
    Int(i64),
    /// An ordered sequence of values.
    List(Rc<RefCell<Vec<Value>>>),
    /// A callable builtin.
    Fn(Builtin),
}

impl Value {
    /// The character this value represents, if any. Single-character strings
    /// count: textual grammars do not distinguish the two.
    #[must_use]
    pub fn as_char(&self) -> Option<char> {
        match self {
            Self::Char(c) => Some(*c),
            Self::Str(s) => {
                let mut chars = s.chars();
                chars.next().filter(|_| chars.next().is_none())
            }
            _ => None,
        }
    }

    /// Apply this value to `args`.
    ///
    /// # Errors
    ///
    /// Fails if the value is not callable, or if the builtin rejects `args`.
    pub fn call(&self, args: Vec<Value>) -> Result<Value, EvalError> {
        match self {
            Self::Fn(builtin) => builtin.call(args),
            other => Err(EvalError::NotCallable(other.repr())),
        }
    }

    /// Render as a Rust literal (the target language of code generation).
    #[must_use]
    pub fn repr(&self) -> String {
        match self {
            Self::None => "None".into(),
            Self::Char(c) => format!("'{}'", escape_char(*c)),
            Self::Str(s) => {
                let escaped: String = s.chars().map(escape_in_string).collect();
                format!("\"{escaped}\"")
            }
            Self::Int(i) => i.to_string(),
            Self::List(items) => {
                format!("[{}]", items.borrow().iter().map(Self::repr).join(", "))
            }
            Self::Fn(builtin) => format!("<builtin {builtin}>"),
        }
    }
}

fn escape_char(c: char) -> String {
    match c {
        '\'' => "\\'".into(),
        '\\' => "\\\\".into(),
        '\n' => "\\n".into(),
        '\t' => "\\t".into(),
        '\r' => "\\r".into(),
        c if c.is_control() => c.escape_default().to_string(),
        c => c.to_string(),
    }
}

fn escape_in_string(c: char) -> String {
    match c {
        '"' => "\\\"".into(),
        '\\' => "\\\\".into(),
        '\n' => "\\n".into(),
        '\t' => "\\t".into(),
        '\r' => "\\r".into(),
        c if c.is_control() => c.escape_default().to_string(),
        c => c.to_string(),
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) => true,
            (Self::Char(a), Self::Char(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::List(a), Self::List(b)) => *a.borrow() == *b.borrow(),
            // Builtins have no meaningful equality.
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}

impl fmt::Display for Value {
    /// The string a value contributes when joined into output text. The unit
    /// value contributes nothing; lists concatenate their items.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Char(c) => write!(f, "{c}"),
            Self::Str(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::List(items) => {
                for item in items.borrow().iter() {
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Self::Fn(builtin) => write!(f, "<builtin {builtin}>"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Self::Char(c)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(Rc::new(RefCell::new(items)))
    }
}

/// A string value. Generated actions build their output out of these.
#[must_use]
pub fn text(s: &str) -> Value {
    Value::from(s)
}

/// Flatten one level: the items of every list in `lists`, in order,
/// as a single new list. Non-list elements are carried over as-is.
#[must_use]
pub fn concat(lists: Vec<Value>) -> Value {
    let mut items = Vec::new();
    for list in lists {
        match list {
            Value::List(inner) => items.extend(inner.borrow().iter().cloned()),
            other => items.push(other),
        }
    }
    Value::from(items)
}

/// Wrap `value` for inclusion in a list: at depth 0 a singleton list, at
/// depth n > 0 one level of `value` is flattened by splicing each of its
/// items at depth n - 1.
///
/// # Errors
///
/// Fails if a positive depth asks to flatten a non-list.
pub fn splice(depth: i64, value: Value) -> Result<Value, EvalError> {
    if depth == 0 {
        return Ok(Value::from(vec![value]));
    }
    match value {
        Value::List(items) => {
            let mut spliced = Vec::new();
            for item in items.borrow().iter() {
                match splice(depth - 1, item.clone())? {
                    Value::List(inner) => spliced.extend(inner.borrow().iter().cloned()),
                    other => spliced.push(other),
                }
            }
            Ok(Value::from(spliced))
        }
        other => Err(EvalError::NotAList(other.repr())),
    }
}

/// Join `items` into a string, recursing into nested lists with the same
/// `delimiter`.
#[must_use]
pub fn join(items: Vec<Value>, delimiter: &str) -> Value {
    Value::Str(join_str(&items, delimiter))
}

fn join_str(items: &[Value], delimiter: &str) -> String {
    items
        .iter()
        .map(|item| match item {
            Value::List(inner) => join_str(&inner.borrow(), delimiter),
            other => other.to_string(),
        })
        .join(delimiter)
}

/// Prefix every line of `value` with `prefix`.
#[must_use]
pub fn indent(value: Value, prefix: Value) -> Value {
    Value::Str(indent_text(&value.to_string(), &prefix.to_string()))
}

fn indent_text(text: &str, prefix: &str) -> String {
    text.split_inclusive('\n')
        .map(|line| format!("{prefix}{line}"))
        .collect()
}

/// A callable pre-seeded into every [`Runtime`].
#[derive(Clone)]
pub enum Builtin {
    /// `len(list-or-string)` → integer.
    Len,
    /// `repr(value)` → Rust-literal rendering.
    Repr,
    /// `charrepr(single-char value)` → Rust char literal.
    CharRepr,
    /// `join(list)` / `join(list, delimiter)` → string.
    Join,
    /// `indent(text)` / `indent(text, prefix)` → string.
    Indent,
    /// `append(list, item)` → unit; grows the list in place.
    Append,
    /// `label()` → a fresh counter callable.
    Label,
    /// A counter made by `label`; each call yields 0, 1, 2, …
    Counter(Rc<Cell<i64>>),
}

impl Builtin {
    fn call(&self, mut args: Vec<Value>) -> Result<Value, EvalError> {
        match self {
            Self::Len => {
                let [value] = take_args(self, args)?;
                match value {
                    Value::List(items) => Ok(Value::Int(int_len(items.borrow().len()))),
                    Value::Str(s) => Ok(Value::Int(int_len(s.chars().count()))),
                    other => Err(EvalError::NotAList(other.repr())),
                }
            }
            Self::Repr => {
                let [value] = take_args(self, args)?;
                Ok(Value::Str(value.repr()))
            }
            Self::CharRepr => {
                let [value] = take_args(self, args)?;
                match value.as_char() {
                    Some(c) => Ok(Value::Str(format!("'{}'", escape_char(c)))),
                    None => Err(EvalError::NotAChar(value.repr())),
                }
            }
            Self::Join => {
                let delimiter = match args.len() {
                    1 => String::new(),
                    2 => args.pop().map(|d| d.to_string()).unwrap_or_default(),
                    got => return Err(EvalError::arity(self, got)),
                };
                let [items] = take_args(self, args)?;
                match items {
                    Value::List(items) => Ok(Value::Str(join_str(&items.borrow(), &delimiter))),
                    other => Err(EvalError::NotAList(other.repr())),
                }
            }
            Self::Indent => {
                let prefix = match args.len() {
                    1 => text("    "),
                    2 => args.pop().unwrap_or(Value::None),
                    got => return Err(EvalError::arity(self, got)),
                };
                let [value] = take_args(self, args)?;
                Ok(indent(value, prefix))
            }
            Self::Append => {
                let [list, item] = take_args(self, args)?;
                match list {
                    Value::List(items) => {
                        items.borrow_mut().push(item);
                        Ok(Value::None)
                    }
                    other => Err(EvalError::NotAList(other.repr())),
                }
            }
            Self::Label => {
                let [] = take_args(self, args)?;
                Ok(Value::Fn(Self::Counter(Rc::new(Cell::new(0)))))
            }
            Self::Counter(state) => {
                let [] = take_args(self, args)?;
                let next = state.get();
                state.set(next + 1);
                Ok(Value::Int(next))
            }
        }
    }
}

fn take_args<const N: usize>(builtin: &Builtin, args: Vec<Value>) -> Result<[Value; N], EvalError> {
    let got = args.len();
    args.try_into().map_err(|_| EvalError::arity(builtin, got))
}

fn int_len(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Len => "len",
            Self::Repr => "repr",
            Self::CharRepr => "charrepr",
            Self::Join => "join",
            Self::Indent => "indent",
            Self::Append => "append",
            Self::Label => "label",
            Self::Counter(_) => "counter",
        })
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<builtin {self}>")
    }
}

/// A failure during deferred action evaluation. Distinct from [`MatchError`]:
/// by the time actions run, matching has already succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// A name was looked up that neither the scope nor the runtime defines.
    Undefined(String),
    /// A non-callable value was applied.
    NotCallable(String),
    /// A list operation hit a non-list.
    NotAList(String),
    /// A character operation hit something other than a single character.
    NotAChar(String),
    /// A builtin was applied to the wrong number of arguments.
    Arity {
        /// The builtin's name.
        name: String,
        /// How many arguments it received.
        got: usize,
    },
}

impl EvalError {
    fn arity(builtin: &Builtin, got: usize) -> Self {
        Self::Arity {
            name: builtin.to_string(),
            got,
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined(name) => write!(f, "undefined name '{name}'"),
            Self::NotCallable(repr) => write!(f, "not callable: {repr}"),
            Self::NotAList(repr) => write!(f, "not a list: {repr}"),
            Self::NotAChar(repr) => write!(f, "not a single character: {repr}"),
            Self::Arity { name, got } => {
                write!(f, "wrong number of arguments for '{name}': got {got}")
            }
        }
    }
}

impl Error for EvalError {}

/// The dynamic environment actions evaluate under: a name→value mapping
/// pre-seeded with the builtins. Binding is a functional update — the
/// original mapping is untouched, so actions that already captured it keep a
/// stable environment.
#[derive(Debug, Clone)]
pub struct Runtime {
    vars: Rc<HashMap<String, Value>>,
}

impl Runtime {
    /// A fresh environment holding only the builtins.
    #[must_use]
    pub fn new() -> Self {
        let mut vars = HashMap::new();
        vars.insert("len".to_owned(), Value::Fn(Builtin::Len));
        vars.insert("repr".to_owned(), Value::Fn(Builtin::Repr));
        vars.insert("charrepr".to_owned(), Value::Fn(Builtin::CharRepr));
        vars.insert("join".to_owned(), Value::Fn(Builtin::Join));
        vars.insert("indent".to_owned(), Value::Fn(Builtin::Indent));
        vars.insert("append".to_owned(), Value::Fn(Builtin::Append));
        vars.insert("label".to_owned(), Value::Fn(Builtin::Label));
        vars.insert("indentprefix".to_owned(), text("    "));
        Self {
            vars: Rc::new(vars),
        }
    }

    /// A new environment in which `name` is bound to `value`, shadowing any
    /// previous binding.
    #[must_use]
    pub fn bind(&self, name: &str, value: Value) -> Self {
        let mut vars = (*self.vars).clone();
        vars.insert(name.to_owned(), value);
        Self {
            vars: Rc::new(vars),
        }
    }

    /// Look `name` up.
    ///
    /// # Errors
    ///
    /// Fails if `name` is not bound.
    pub fn lookup(&self, name: &str) -> Result<Value, EvalError> {
        self.vars
            .get(name)
            .cloned()
            .ok_or_else(|| EvalError::Undefined(name.to_owned()))
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

type ScopeMap = HashMap<String, Action>;
type ScopeRef = Rc<RefCell<ScopeMap>>;

/// The function half of an [`Action`].
pub type ActionFn = Rc<dyn Fn(&Eval) -> Result<Value, EvalError>>;

/// A suspended computation: the lexical scope that was on top of the stream's
/// stack at construction time, plus a closure evaluated later against a
/// [`Runtime`]. Actions never observe or mutate the stream; they run only
/// after all matching completes.
#[derive(Clone)]
pub struct Action {
    scope: ScopeRef,
    run: ActionFn,
}

impl Action {
    /// Run the suspended computation under `runtime`.
    ///
    /// # Errors
    ///
    /// Fails if the closure fails, e.g. on an undefined name.
    pub fn eval(&self, runtime: &Runtime) -> Result<Value, EvalError> {
        let ev = Eval {
            scope: Rc::clone(&self.scope),
            runtime: runtime.clone(),
        };
        (self.run)(&ev)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action").finish_non_exhaustive()
    }
}

/// What an action's closure sees while evaluating: name lookup through the
/// captured scope (then the runtime), and continuation-passing binding into
/// the runtime.
pub struct Eval {
    scope: ScopeRef,
    runtime: Runtime,
}

impl Eval {
    /// Resolve `name`. A name bound in the captured scope resolves by
    /// evaluating that binding's action under the current runtime — this is
    /// how matched substructures become visible under their binding names.
    /// Anything else falls through to the runtime.
    ///
    /// # Errors
    ///
    /// Fails if `name` is bound nowhere, or its bound action fails.
    pub fn lookup(&self, name: &str) -> Result<Value, EvalError> {
        let bound = self.scope.borrow().get(name).cloned();
        match bound {
            Some(action) => action.eval(&self.runtime),
            None => self.runtime.lookup(name),
        }
    }

    /// Extend the runtime with `name` = `value` and evaluate `continuation`
    /// under the extended environment.
    ///
    /// # Errors
    ///
    /// Fails if the continuation fails.
    pub fn bind<F>(&self, name: &str, value: Value, continuation: F) -> Result<Value, EvalError>
    where
        F: FnOnce(&Eval) -> Result<Value, EvalError>,
    {
        let extended = Self {
            scope: Rc::clone(&self.scope),
            runtime: self.runtime.bind(name, value),
        };
        continuation(&extended)
    }

    /// The current runtime.
    #[must_use]
    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }
}

impl fmt::Debug for Eval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Eval").finish_non_exhaustive()
    }
}

/// The items a [`Stream`] walks over.
pub type Items = Rc<RefCell<Vec<Value>>>;

/// A match failure, carrying the stream and cursor position at fault. The
/// stream keeps the *furthest* such record across all backtracked attempts;
/// that record is what surfaces as the user-visible diagnostic.
#[derive(Debug, Clone)]
pub struct MatchError {
    message: String,
    items: Items,
    index: usize,
}

impl MatchError {
    /// What went wrong.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The cursor position at fault.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The full user-facing diagnostic: message, position, and a dump of the
    /// failing stream. For character streams a marker is spliced in at the
    /// failing position (red if colored output is enabled); list streams are
    /// pretty-printed.
    #[must_use]
    pub fn diagnostic(&self) -> String {
        let items = self.items.borrow();
        let all_chars = items.iter().all(|item| matches!(item, Value::Char(_)));
        let stream = if all_chars {
            let marker = "<ERROR POSITION>".red().to_string();
            let mut out = String::new();
            for (i, item) in items.iter().enumerate() {
                if i == self.index {
                    out.push_str(&marker);
                }
                if let Value::Char(c) = item {
                    out.push(*c);
                }
            }
            if self.index >= items.len() {
                out.push_str(&marker);
            }
            out
        } else {
            let lines: String = items
                .iter()
                .map(|item| format!("    {},\n", item.repr()))
                .collect();
            format!("[\n{lines}]")
        };
        format!(
            "ERROR: {}\nPOSITION: {}\nSTREAM:\n{}",
            self.message,
            self.index,
            indent_text(&stream, "    ")
        )
    }
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for MatchError {}

/// A snapshot of a [`Stream`], taken by every backtracking combinator before
/// an attempt.
#[derive(Debug)]
pub struct State {
    items: Items,
    scopes: Vec<ScopeRef>,
    index: usize,
}

/// A cursor over a sequence of items, together with the lexical scope stack
/// and the furthest-error record.
#[derive(Debug)]
pub struct Stream {
    items: Items,
    index: usize,
    scopes: Vec<ScopeRef>,
    furthest: Option<MatchError>,
    suppress: bool,
}

impl Stream {
    /// A stream over `items`, positioned at the start, with a single root
    /// scope (so producing an action is always possible).
    #[must_use]
    pub fn new(items: Vec<Value>) -> Self {
        Self {
            items: Rc::new(RefCell::new(items)),
            index: 0,
            scopes: vec![Rc::new(RefCell::new(ScopeMap::new()))],
            furthest: None,
            suppress: false,
        }
    }

    /// A stream over a pipeline stage's source: strings stream their
    /// characters, lists their items, anything else itself.
    #[must_use]
    pub fn from_source(source: &Value) -> Self {
        match source {
            Value::Str(s) => Self::new(s.chars().map(Value::Char).collect()),
            Value::List(items) => Self::new(items.borrow().clone()),
            other => Self::new(vec![other.clone()]),
        }
    }

    /// Snapshot items, scope stack, and cursor. Each scope is copied into a
    /// fresh map: a failed attempt must not leak bindings into the snapshot,
    /// and actions keep their reference to the map they captured.
    #[must_use]
    pub fn save(&self) -> State {
        State {
            items: Rc::clone(&self.items),
            scopes: self
                .scopes
                .iter()
                .map(|scope| Rc::new(RefCell::new(scope.borrow().clone())))
                .collect(),
            index: self.index,
        }
    }

    /// Roll back to a snapshot. The furthest-error record survives.
    pub fn restore(&mut self, state: State) {
        self.items = state.items;
        self.scopes = state.scopes;
        self.index = state.index;
    }

    /// Push a fresh, empty lexical scope.
    pub fn push_scope(&mut self) {
        self.scopes.push(Rc::new(RefCell::new(ScopeMap::new())));
    }

    /// Pop the top lexical scope.
    pub fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    /// Store `action` under `name` in the top scope and hand it back.
    pub fn bind(&mut self, name: &str, action: Action) -> Action {
        self.top_scope()
            .borrow_mut()
            .insert(name.to_owned(), action.clone());
        action
    }

    /// An action capturing the current top scope.
    pub fn action<F>(&self, run: F) -> Action
    where
        F: Fn(&Eval) -> Result<Value, EvalError> + 'static,
    {
        self.action_from(Rc::new(run))
    }

    /// Like [`Self::action`], but reusing an existing closure.
    #[must_use]
    pub fn action_from(&self, run: ActionFn) -> Action {
        Action {
            scope: Rc::clone(self.top_scope()),
            run,
        }
    }

    fn top_scope(&self) -> &ScopeRef {
        self.scopes.last().expect("stream always has a root scope")
    }

    /// If the cursor is on an item satisfying `pred`, advance past it and
    /// return an action yielding the item.
    ///
    /// # Errors
    ///
    /// Fails at end of input or on a non-satisfying item.
    pub fn match_object(&mut self, pred: &Pred) -> Result<Action, MatchError> {
        let item = self.items.borrow().get(self.index).cloned();
        match item {
            Some(item) if pred.matches(&item) => {
                self.index += 1;
                Ok(self.action(move |_ev| Ok(item.clone())))
            }
            _ => self.error(&format!("expected {pred}")),
        }
    }

    /// If the cursor is on a list, descend into it: run `matcher` over the
    /// sub-sequence from position 0, then restore the outer sequence and, on
    /// success, advance the outer cursor past the list.
    ///
    /// # Errors
    ///
    /// Fails if the cursor is not on a list, or `matcher` fails inside it.
    pub fn match_list<F>(&mut self, matcher: F) -> Result<Action, MatchError>
    where
        F: FnOnce(&mut Self) -> Result<Action, MatchError>,
    {
        let sub = match self.items.borrow().get(self.index) {
            Some(Value::List(sub)) => Some(Rc::clone(sub)),
            _ => None,
        };
        let Some(sub) = sub else {
            return self.error("no list at cursor");
        };
        let outer_items = std::mem::replace(&mut self.items, sub);
        let outer_index = std::mem::replace(&mut self.index, 0);
        let result = matcher(self);
        // Back out to the enclosing sequence on every exit path.
        self.items = outer_items;
        self.index = outer_index;
        let action = result?;
        self.index += 1;
        Ok(action)
    }

    /// Read a constructor tag at the cursor, advance past it, and run the
    /// rule registered as `"{namespace}.{tag}"`.
    ///
    /// # Errors
    ///
    /// Fails if the cursor is not on a string, no such rule is registered, or
    /// the rule fails.
    pub fn match_call_rule(
        &mut self,
        namespace: &str,
        rules: &Rules,
    ) -> Result<Action, MatchError> {
        let tag = match self.items.borrow().get(self.index) {
            Some(Value::Str(tag)) => Some(tag.clone()),
            _ => None,
        };
        let Some(tag) = tag else {
            return self.error("unknown rule");
        };
        let name = format!("{namespace}.{tag}");
        let Some(matcher) = rules.get(&name) else {
            return self.error("unknown rule");
        };
        trace!("dispatching on tag: {name}");
        self.index += 1;
        matcher.run(self, rules)
    }

    /// Record and raise a match failure. The furthest-error record is
    /// updated only on a strictly deeper cursor (ties keep the earlier
    /// error), and not at all while a lookahead suppresses recording; the
    /// raised error always carries the furthest record.
    ///
    /// # Errors
    ///
    /// Always.
    pub fn error<T>(&mut self, message: &str) -> Result<T, MatchError> {
        let current = MatchError {
            message: message.to_owned(),
            items: Rc::clone(&self.items),
            index: self.index,
        };
        if !self.suppress
            && self
                .furthest
                .as_ref()
                .map_or(true, |furthest| self.index > furthest.index)
        {
            self.furthest = Some(current.clone());
        }
        Err(self.furthest.clone().unwrap_or(current))
    }

    /// Toggle furthest-error recording, returning the previous setting so
    /// lookaheads can nest.
    pub fn suppress_errors(&mut self, suppress: bool) -> bool {
        std::mem::replace(&mut self.suppress, suppress)
    }

    /// The furthest failure recorded so far, if any.
    #[must_use]
    pub fn furthest_error(&self) -> Option<&MatchError> {
        self.furthest.as_ref()
    }
}

/// An item predicate for [`Matcher::Object`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pred {
    /// Any item at all.
    Any,
    /// Exactly this character.
    Eq(char),
    /// Any character in this inclusive range.
    Range(char, char),
}

impl Pred {
    /// Does `item` satisfy this predicate?
    #[must_use]
    pub fn matches(&self, item: &Value) -> bool {
        match self {
            Self::Any => true,
            Self::Eq(expected) => item.as_char() == Some(*expected),
            Self::Range(low, high) => item
                .as_char()
                .map_or(false, |c| (*low..=*high).contains(&c)),
        }
    }
}

impl fmt::Display for Pred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any item"),
            Self::Eq(c) => write!(f, "'{}'", escape_char(*c)),
            Self::Range(low, high) => {
                write!(f, "'{}'-'{}'", escape_char(*low), escape_char(*high))
            }
        }
    }
}

/// The rule registry: fully qualified rule name → root matcher. Populated
/// once by the generated `install` functions, read-only afterwards.
pub type Rules = HashMap<String, Matcher>;

/// A matcher combinator. Trees are owned; cross-rule references go through
/// the [`Rules`] registry by name, which is what breaks grammar recursion.
#[derive(Clone)]
pub enum Matcher {
    /// Ordered choice: first success wins.
    Or(Vec<Matcher>),
    /// Sequence: all must match; the last action is the result.
    And(Vec<Matcher>),
    /// Greedy, unbounded repetition.
    Star(Box<Matcher>),
    /// Zero-width negative lookahead.
    Not(Box<Matcher>),
    /// Run the inner matcher and bind its action in the top scope.
    Bind(String, Box<Matcher>),
    /// Run the inner matcher under a fresh lexical scope.
    Scope(Box<Matcher>),
    /// Match a single item by predicate.
    Object(Pred),
    /// Descend into a nested list.
    List(Box<Matcher>),
    /// Run a rule by fully qualified name.
    Rule(String),
    /// Dispatch on the constructor tag at the cursor, within a namespace.
    CallRule(String),
    /// Produce a deferred semantic action.
    Act(ActionFn),
}

impl Matcher {
    /// Run this matcher against `stream`, resolving rule references through
    /// `rules`.
    ///
    /// # Errors
    ///
    /// Fails with the stream's furthest [`MatchError`] if no match is
    /// possible. Failures propagate freely; only `Or`, `Star` and `Not`
    /// catch them, and each brackets its attempt with save/restore.
    pub fn run(&self, stream: &mut Stream, rules: &Rules) -> Result<Action, MatchError> {
        match self {
            Self::Or(alternatives) => {
                for matcher in alternatives {
                    let state = stream.save();
                    match matcher.run(stream, rules) {
                        Ok(action) => return Ok(action),
                        Err(error) => {
                            trace!("alternative failed ({error}), backtracking");
                            stream.restore(state);
                        }
                    }
                }
                stream.error("no alternative matched")
            }
            Self::And(sequence) => {
                let mut result = stream.action(|_ev| Ok(Value::None));
                for matcher in sequence {
                    result = matcher.run(stream, rules)?;
                }
                Ok(result)
            }
            Self::Star(matcher) => {
                let mut collected = Vec::new();
                loop {
                    let state = stream.save();
                    match matcher.run(stream, rules) {
                        Ok(action) => collected.push(action),
                        Err(_) => {
                            stream.restore(state);
                            break;
                        }
                    }
                }
                // The sub-actions evaluate when the star's action is
                // consumed, so they see runtime bindings made in between.
                Ok(stream.action(move |ev| {
                    let values = collected
                        .iter()
                        .map(|action| action.eval(ev.runtime()))
                        .collect::<Result<Vec<_>, _>>()?;
                    Ok(Value::from(values))
                }))
            }
            Self::Not(matcher) => {
                let state = stream.save();
                let prev = stream.suppress_errors(true);
                let outcome = matcher.run(stream, rules);
                stream.suppress_errors(prev);
                stream.restore(state);
                match outcome {
                    Err(_) => Ok(stream.action(|_ev| Ok(Value::None))),
                    Ok(_) => stream.error("unexpected item"),
                }
            }
            Self::Bind(name, matcher) => {
                let action = matcher.run(stream, rules)?;
                Ok(stream.bind(name, action))
            }
            Self::Scope(matcher) => {
                stream.push_scope();
                let result = matcher.run(stream, rules);
                stream.pop_scope();
                result
            }
            Self::Object(pred) => stream.match_object(pred),
            Self::List(matcher) => stream.match_list(|sub| matcher.run(sub, rules)),
            Self::Rule(name) => match rules.get(name) {
                Some(matcher) => matcher.run(stream, rules),
                None => stream.error(&format!("unknown rule {name}")),
            },
            Self::CallRule(namespace) => stream.match_call_rule(namespace, rules),
            Self::Act(run) => Ok(stream.action_from(Rc::clone(run))),
        }
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Or(ms) => f.debug_tuple("Or").field(ms).finish(),
            Self::And(ms) => f.debug_tuple("And").field(ms).finish(),
            Self::Star(m) => f.debug_tuple("Star").field(m).finish(),
            Self::Not(m) => f.debug_tuple("Not").field(m).finish(),
            Self::Bind(name, m) => f.debug_tuple("Bind").field(name).field(m).finish(),
            Self::Scope(m) => f.debug_tuple("Scope").field(m).finish(),
            Self::Object(pred) => f.debug_tuple("Object").field(pred).finish(),
            Self::List(m) => f.debug_tuple("List").field(m).finish(),
            Self::Rule(name) => f.debug_tuple("Rule").field(name).finish(),
            Self::CallRule(ns) => f.debug_tuple("CallRule").field(ns).finish(),
            Self::Act(_) => f.write_str("Act"),
        }
    }
}

/// Ordered choice over `alternatives`.
#[must_use]
pub fn or(alternatives: Vec<Matcher>) -> Matcher {
    Matcher::Or(alternatives)
}

/// Sequence of `matchers`; the last action wins.
#[must_use]
pub fn and(matchers: Vec<Matcher>) -> Matcher {
    Matcher::And(matchers)
}

/// Greedy repetition of `matcher`.
#[must_use]
pub fn star(matcher: Matcher) -> Matcher {
    Matcher::Star(Box::new(matcher))
}

/// Negative lookahead on `matcher`.
#[must_use]
pub fn not(matcher: Matcher) -> Matcher {
    Matcher::Not(Box::new(matcher))
}

/// Bind `matcher`'s result under `name` in the enclosing scope.
#[must_use]
pub fn bind(name: &str, matcher: Matcher) -> Matcher {
    Matcher::Bind(name.to_owned(), Box::new(matcher))
}

/// Run `matcher` under a fresh lexical scope.
#[must_use]
pub fn scope(matcher: Matcher) -> Matcher {
    Matcher::Scope(Box::new(matcher))
}

/// Match one item satisfying `pred`.
#[must_use]
pub fn match_object(pred: Pred) -> Matcher {
    Matcher::Object(pred)
}

/// Descend into a nested list with `matcher`.
#[must_use]
pub fn match_list(matcher: Matcher) -> Matcher {
    Matcher::List(Box::new(matcher))
}

/// Invoke the rule registered under the fully qualified `name`.
#[must_use]
pub fn match_rule(name: &str) -> Matcher {
    Matcher::Rule(name.to_owned())
}

/// Dispatch on the tag at the cursor within `namespace`.
#[must_use]
pub fn match_call_rule(namespace: &str) -> Matcher {
    Matcher::CallRule(namespace.to_owned())
}

/// A deferred semantic action.
pub fn action<F>(run: F) -> Matcher
where
    F: Fn(&Eval) -> Result<Value, EvalError> + 'static,
{
    Matcher::Act(Rc::new(run))
}

/// Any failure a pipeline stage can produce.
#[derive(Debug, Clone)]
pub enum CompileError {
    /// Matching failed; carries the furthest-error record.
    Match(MatchError),
    /// Matching succeeded but a deferred action failed.
    Eval(EvalError),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Match(e) => write!(f, "{e}"),
            Self::Eval(e) => write!(f, "{e}"),
        }
    }
}

impl Error for CompileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Match(e) => Some(e),
            Self::Eval(e) => Some(e),
        }
    }
}

impl From<MatchError> for CompileError {
    fn from(e: MatchError) -> Self {
        Self::Match(e)
    }
}

impl From<EvalError> for CompileError {
    fn from(e: EvalError) -> Self {
        Self::Eval(e)
    }
}

/// Run `source` through the named rules in order: each stage matches over a
/// fresh stream of the current source, then evaluates the resulting action
/// against a fresh runtime, and the value becomes the next stage's source.
///
/// # Errors
///
/// Fails with the stage's [`CompileError`] on the first failing stage.
pub fn compile_chain(rules: &Rules, chain: &[&str], source: Value) -> Result<Value, CompileError> {
    let mut source = source;
    for name in chain {
        debug!("running pipeline stage: {name}");
        let mut stream = Stream::from_source(&source);
        let action = match rules.get(*name) {
            Some(matcher) => matcher.run(&mut stream, rules)?,
            None => stream.error(&format!("unknown rule {name}"))?,
        };
        source = action.eval(&Runtime::new())?;
        debug!("pipeline stage done: {name}");
    }
    Ok(source)
}
