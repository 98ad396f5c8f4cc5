// src/core/command.rs

//! The command value rules build and hand to the executor.
//!
//! Rule templates produce nested argument lists where optional flags
//! evaluate to empty strings. [`Command::new`] flattens the nesting and drops
//! the empty elements, so `["gcc", ["-o", "out"], "", [["-c"], "main.c"]]`
//! becomes `gcc -o out -c main.c`.

use crate::models::DynamicValue;
use std::{
    fmt,
    path::{Path, PathBuf},
};

/// One argument of a command under construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    /// A single element; an empty string behaves like [`Argument::Empty`].
    Value(String),
    /// An argument that evaluated to nothing, dropped on flattening.
    Empty,
    /// A nested list, spliced in place.
    List(Vec<Argument>),
}

impl Argument {
    fn flatten_into(self, elements: &mut Vec<String>) {
        match self {
            Argument::Value(value) if value.is_empty() => {}
            Argument::Value(value) => elements.push(value),
            Argument::Empty => {}
            Argument::List(items) => {
                for item in items {
                    item.flatten_into(elements);
                }
            }
        }
    }
}

impl From<&str> for Argument {
    fn from(value: &str) -> Self {
        Argument::Value(value.to_string())
    }
}

impl From<String> for Argument {
    fn from(value: String) -> Self {
        Argument::Value(value)
    }
}

impl From<&String> for Argument {
    fn from(value: &String) -> Self {
        Argument::Value(value.clone())
    }
}

macro_rules! argument_from_display {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Argument {
                fn from(value: $ty) -> Self {
                    Argument::Value(value.to_string())
                }
            }
        )*
    };
}

argument_from_display!(i32, i64, u32, u64, usize, f64, bool, char);

impl From<&Path> for Argument {
    fn from(value: &Path) -> Self {
        Argument::Value(value.to_string_lossy().into_owned())
    }
}

impl From<PathBuf> for Argument {
    fn from(value: PathBuf) -> Self {
        Argument::from(value.as_path())
    }
}

impl From<&DynamicValue> for Argument {
    /// Sequences spread into separate arguments; mappings render flow style.
    fn from(value: &DynamicValue) -> Self {
        match value {
            DynamicValue::Scalar(text) => Argument::Value(text.clone()),
            DynamicValue::Sequence(items) => {
                Argument::List(items.iter().map(Argument::from).collect())
            }
            DynamicValue::Mapping(_) => Argument::Value(value.to_string()),
        }
    }
}

impl From<DynamicValue> for Argument {
    fn from(value: DynamicValue) -> Self {
        Argument::from(&value)
    }
}

impl<T: Into<Argument>> From<Option<T>> for Argument {
    fn from(value: Option<T>) -> Self {
        value.map_or(Argument::Empty, Into::into)
    }
}

impl<T: Into<Argument>> From<Vec<T>> for Argument {
    fn from(value: Vec<T>) -> Self {
        Argument::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Argument>, const N: usize> From<[T; N]> for Argument {
    fn from(value: [T; N]) -> Self {
        Argument::List(value.into_iter().map(Into::into).collect())
    }
}

/// A flat, non-empty-element command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Command {
    elements: Vec<String>,
}

impl Command {
    /// Flattens `arguments` depth-first, dropping empty elements.
    pub fn new<I, A>(arguments: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Argument>,
    {
        let mut elements = Vec::new();
        for argument in arguments {
            argument.into().flatten_into(&mut elements);
        }
        Self { elements }
    }

    /// Builds a command from already flat elements; empty ones are still dropped.
    pub fn from_elements<I, S>(elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            elements: elements
                .into_iter()
                .map(Into::into)
                .filter(|e: &String| !e.is_empty())
                .collect(),
        }
    }

    /// The flat, non-empty elements in order.
    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    /// Whether nothing survived flattening.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The program to run, i.e. the first element.
    pub fn program(&self) -> Option<&str> {
        self.elements.first().map(String::as_str)
    }

    /// Every element after the program.
    pub fn arguments(&self) -> &[String] {
        self.elements.get(1..).unwrap_or_default()
    }

    /// Renders the command as a line a POSIX shell would split back into
    /// the same elements, quoting where needed.
    pub fn to_shell_string(&self) -> String {
        shlex::try_join(self.elements.iter().map(String::as_str))
            .unwrap_or_else(|_| self.elements.join(" "))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ {} ]", self.elements.join(", "))
    }
}

/// Builds a [`Command`] from an argument list where elements may
/// themselves be bracketed lists:
///
/// ```
/// use nightingale::command;
///
/// let cmd = command!["gcc", ["-o", "out"], "", [["-c"], "main.c"]];
/// assert_eq!(cmd.elements(), ["gcc", "-o", "out", "-c", "main.c"]);
/// ```
#[macro_export]
macro_rules! command {
    ($($args:tt)*) => {
        $crate::core::command::Command::new($crate::__arguments!(@acc [] $($args)*))
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __arguments {
    (@acc [$($done:expr),*]) => {{
        let arguments: ::std::vec::Vec<$crate::core::command::Argument> = ::std::vec![$($done),*];
        arguments
    }};
    (@acc [$($done:expr),*] [$($inner:tt)*] $(, $($rest:tt)*)?) => {
        $crate::__arguments!(
            @acc [$($done,)* $crate::core::command::Argument::List($crate::__arguments!(@acc [] $($inner)*))]
            $($($rest)*)?
        )
    };
    (@acc [$($done:expr),*] $value:expr $(, $($rest:tt)*)?) => {
        $crate::__arguments!(
            @acc [$($done,)* $crate::core::command::Argument::from($value)]
            $($($rest)*)?
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_arguments_are_flattened() {
        let cmd = Command::new([
            Argument::from("gcc"),
            Argument::from(["-o", "out"]),
            Argument::from(""),
            Argument::List(vec![Argument::from(["-c"]), Argument::from("main.c")]),
        ]);
        assert_eq!(cmd.elements(), ["gcc", "-o", "out", "-c", "main.c"]);
        assert_eq!(cmd.program(), Some("gcc"));
        assert_eq!(cmd.arguments(), ["-o", "out", "-c", "main.c"]);
    }

    #[test]
    fn test_macro_matches_builder() {
        let cmd = crate::command!["gcc", ["-o", "out"], "", [["-c"], "main.c"]];
        assert_eq!(cmd.elements(), ["gcc", "-o", "out", "-c", "main.c"]);
    }

    #[test]
    fn test_optional_and_typed_arguments() {
        let draft: Option<&str> = None;
        let cmd = crate::command!["pdflatex", draft, Some("-shell-escape"), 2, true];
        assert_eq!(cmd.elements(), ["pdflatex", "-shell-escape", "2", "true"]);
    }

    #[test]
    fn test_dynamic_values_spread() {
        let files = DynamicValue::Sequence(vec![
            DynamicValue::from("a.aux"),
            DynamicValue::from(""),
            DynamicValue::from("b.aux"),
        ]);
        let cmd = crate::command!["rm", &files];
        assert_eq!(cmd.elements(), ["rm", "a.aux", "b.aux"]);
    }

    #[test]
    fn test_empty_command() {
        let cmd = Command::new(Vec::<Argument>::new());
        assert!(cmd.is_empty());
        assert_eq!(cmd.program(), None);
        assert!(cmd.arguments().is_empty());
        assert_eq!(cmd.to_string(), "[  ]");
    }

    #[test]
    fn test_display_and_shell_rendering() {
        let cmd = Command::from_elements(["pdflatex", "", "my thesis.tex"]);
        assert_eq!(cmd.to_string(), "[ pdflatex, my thesis.tex ]");
        assert_eq!(cmd.to_shell_string(), "pdflatex 'my thesis.tex'");
    }
}
