// src/models.rs

//! Data model shared by the directive pipeline and its collaborators.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use crate::constants::DEFAULT_MAX_LOOPS;

// --- PARAMETER VALUES ---

/// The decoded parameters of a directive, keyed by parameter name.
pub type Parameters = BTreeMap<String, DynamicValue>;

/// A decoded parameter value.
///
/// Parameter blocks are free-form nested key-value markup, so values are
/// kept as an explicit tree instead of a fixed schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DynamicValue {
    /// A primitive in its textual form (`yes`, `1`, `main.tex`).
    Scalar(String),
    /// An ordered list of values.
    Sequence(Vec<DynamicValue>),
    /// A nested mapping with string keys.
    Mapping(Parameters),
}

impl DynamicValue {
    /// Returns the scalar text, or `None` for sequences and mappings.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements of a sequence, or `None` for anything else.
    pub fn as_sequence(&self) -> Option<&[DynamicValue]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries of a mapping, or `None` for anything else.
    pub fn as_mapping(&self) -> Option<&Parameters> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// The textual value used when a parameter is turned into a path or a
    /// command token: the raw text for scalars, the flow rendering otherwise.
    pub fn text(&self) -> String {
        match self {
            Self::Scalar(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for DynamicValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(s) => write!(f, "{}", s),
            Self::Sequence(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Self::Mapping(map) => write_mapping(f, map),
        }
    }
}

impl From<&str> for DynamicValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<String> for DynamicValue {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

fn write_mapping(f: &mut fmt::Formatter<'_>, map: &Parameters) -> fmt::Result {
    write!(f, "{{")?;
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}: {}", key, value)?;
    }
    write!(f, "}}")
}

// --- CONDITIONALS ---

/// How the rule engine guards the execution of a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConditionalType {
    /// Run once, unconditionally.
    #[default]
    None,
    /// Run once if the condition holds.
    If,
    /// Run repeatedly while the condition holds.
    While,
    /// Run repeatedly until the condition holds.
    Until,
    /// Run once unless the condition holds.
    Unless,
}

impl ConditionalType {
    /// The upper-case name used in logs and summaries.
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::If => "IF",
            Self::While => "WHILE",
            Self::Until => "UNTIL",
            Self::Unless => "UNLESS",
        }
    }
}

impl fmt::Display for ConditionalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The guard attached to a directive. `condition` is empty for `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Conditional {
    /// How `condition` is applied.
    pub kind: ConditionalType,
    /// The expression, verbatim.
    pub condition: String,
}

impl Conditional {
    /// A guard of `kind` over `condition`.
    pub fn new(kind: ConditionalType, condition: impl Into<String>) -> Self {
        Self {
            kind,
            condition: condition.into(),
        }
    }

    /// An unconditional guard.
    pub fn none() -> Self {
        Self::default()
    }
}

impl fmt::Display for Conditional {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind == ConditionalType::None {
            write!(f, "{{ {} }}", self.kind)
        } else {
            write!(f, "{{ {}: {} }}", self.kind, self.condition)
        }
    }
}

// --- DIRECTIVES ---

/// One build instruction extracted from a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Names the rule the engine should run.
    pub identifier: String,
    /// Decoded parameter block; holds `file` once validated.
    pub parameters: Parameters,
    /// Guard evaluated by the engine.
    pub conditional: Conditional,
    /// The source lines that contributed to this directive, ascending.
    pub line_numbers: Vec<usize>,
    /// Set once the validator has injected `file`; such directives pass
    /// through validation untouched.
    pub(crate) resolved: bool,
}

impl Directive {
    /// Creates a directive as written by the user (not yet validated).
    pub fn new(
        identifier: impl Into<String>,
        parameters: Parameters,
        conditional: Conditional,
        line_numbers: Vec<usize>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            parameters,
            conditional,
            line_numbers,
            resolved: false,
        }
    }

    /// Whether this directive came out of validation.
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Directive: {{ identifier: {}, parameters: ", self.identifier)?;
        write_mapping(f, &self.parameters)?;
        write!(
            f,
            ", conditional: {}, lines: {} }}",
            self.conditional,
            format_lines(&self.line_numbers)
        )
    }
}

/// Renders line numbers as `(1, 2, 3)`.
pub fn format_lines(lines: &[usize]) -> String {
    let joined = lines
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("({})", joined)
}

// --- EXECUTION OPTIONS ---

/// Run-wide options handed to the rule engine along with the validated directives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOptions {
    /// Show what would run without running it.
    pub dry_run: bool,
    /// Echo the output of the commands.
    pub verbose: bool,
    /// Write the run log to [`crate::constants::LOG_FILENAME`].
    pub logging: bool,
    /// Cleared by `--dry-run`: the engine keeps going after a failed rule.
    pub halt_on_errors: bool,
    /// Per-command limit; `None` waits forever.
    pub timeout: Option<Duration>,
    /// Upper bound on iterations of looping conditionals.
    pub max_loops: u64,
    /// The language code used to render user-facing messages.
    pub language: String,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            verbose: false,
            logging: false,
            halt_on_errors: true,
            timeout: None,
            max_loops: DEFAULT_MAX_LOOPS,
            language: crate::DEFAULT_LANGUAGE.to_string(),
        }
    }
}

// MARK: --- UNIT TESTS ---
