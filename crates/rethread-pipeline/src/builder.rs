//! Replacement text for rewritten signatures and call sites.
//!
//! Builders only deal in text. They receive the already filtered pieces of a
//! match and return the code that replaces it, always with a trailing comma
//! after the last parameter or argument.

/// Where a new parameter lands in an existing parameter list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    /// Immediately before the final parameter, which keeps a trailing
    /// context argument last. An empty list receives the parameter alone.
    BeforeLast,
    /// After every existing parameter.
    Append,
}

/// Returns `params` with `new_param` inserted at `position`, joined with
/// `", "` and comma-terminated.
#[must_use]
pub fn insert_parameter(params: &[&str], new_param: &str, position: InsertPosition) -> String {
    let mut list = params.to_vec();
    let index = match position {
        InsertPosition::BeforeLast => list.len().saturating_sub(1),
        InsertPosition::Append => list.len(),
    };
    list.insert(index, new_param);
    comma_terminated(&list)
}

/// Rebuilds a call as `{callee}({args..., literal},)`.
#[must_use]
pub fn append_argument(callee: &str, args: &[&str], literal: &str) -> String {
    let mut list = args.to_vec();
    list.push(literal);
    format!("{callee}({})", comma_terminated(&list))
}

/// Rebuilds a function from its head (everything before the parameter
/// list), a comma-terminated parameter list, its return type, and its body
/// block.
#[must_use]
pub fn reassemble_function(head: &str, params: &str, return_type: &str, body: &str) -> String {
    format!("{head}({params}) -> {return_type} {body}")
}

fn comma_terminated(items: &[&str]) -> String {
    let mut text = items.join(", ");
    text.push(',');
    text
}
