use crate::errors::{ShellError, ShellResult};

/// Characters that split a line into two commands.
pub const OPERATORS: [char; 4] = [';', '<', '>', '|'];

/// Characters that separate tokens. Operators are separators too.
pub const SEPARATORS: [char; 8] = [' ', '\t', '(', ')', '<', '>', ';', '|'];

/// Control operator joining the two halves of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    None,
    Sequence,
    Pipe,
    RedirectIn,
    RedirectOut,
}

impl Operator {
    pub fn from_char(c: char) -> Option<Self> {
        if !OPERATORS.contains(&c) {
            return None;
        }
        match c {
            ';' => Some(Operator::Sequence),
            '|' => Some(Operator::Pipe),
            '<' => Some(Operator::RedirectIn),
            '>' => Some(Operator::RedirectOut),
            _ => None,
        }
    }

    /// The operator as typed; empty for [`Operator::None`].
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::None => "",
            Operator::Sequence => ";",
            Operator::Pipe => "|",
            Operator::RedirectIn => "<",
            Operator::RedirectOut => ">",
        }
    }
}

/// Parsed form of one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPlan {
    pub operator: Operator,
    pub left: Vec<String>,
    pub right: Vec<String>,
}

impl ExecutionPlan {
    /// An empty left side means there is nothing to run.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }
}

/// Locate the first control operator: its byte offset and kind.
pub fn find_operator(line: &str) -> Option<(usize, Operator)> {
    line.char_indices()
        .find_map(|(i, c)| Operator::from_char(c).map(|op| (i, op)))
}

/// Split a line on [`SEPARATORS`], keeping each token's starting byte offset.
pub fn tokenize(line: &str) -> Vec<(usize, &str)> {
    let mut tokens = Vec::new();
    let mut start = None;

    for (i, c) in line.char_indices() {
        if SEPARATORS.contains(&c) {
            if let Some(s) = start.take() {
                tokens.push((s, &line[s..i]));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        tokens.push((s, &line[s..]));
    }

    tokens
}

/// Turn a line into an [`ExecutionPlan`].
///
/// Tokens starting before the first operator form `left`, every later token
/// forms `right` (including tokens past a second operator). Either side
/// holding more than `max_args` tokens is rejected.
pub fn parse(line: &str, max_args: usize) -> ShellResult<ExecutionPlan> {
    let (operator, split_at) = match find_operator(line) {
        Some((index, op)) => (op, Some(index)),
        None => (Operator::None, None),
    };

    let mut left = Vec::new();
    let mut right = Vec::new();
    for (offset, token) in tokenize(line) {
        let on_left = split_at.map_or(true, |index| offset <= index);
        if on_left {
            left.push(token.to_string());
        } else {
            right.push(token.to_string());
        }
    }

    if left.len() > max_args || right.len() > max_args {
        return Err(ShellError::TooManyArguments { limit: max_args });
    }

    Ok(ExecutionPlan {
        operator,
        left,
        right,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_ARGS;

    fn words(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn sequence_splits_both_sides() {
        let plan = parse("ls -la ; pwd", MAX_ARGS).unwrap();
        assert_eq!(plan.operator, Operator::Sequence);
        assert_eq!(plan.left, words(&["ls", "-la"]));
        assert_eq!(plan.right, words(&["pwd"]));
    }

    #[test]
    fn redirect_out_puts_file_on_the_right() {
        let plan = parse("echo hi > out.txt", MAX_ARGS).unwrap();
        assert_eq!(plan.operator, Operator::RedirectOut);
        assert_eq!(plan.left, words(&["echo", "hi"]));
        assert_eq!(plan.right, words(&["out.txt"]));
    }

    #[test]
    fn pipe_splits_commands() {
        let plan = parse("cat | wc", MAX_ARGS).unwrap();
        assert_eq!(plan.operator, Operator::Pipe);
        assert_eq!(plan.left, words(&["cat"]));
        assert_eq!(plan.right, words(&["wc"]));
    }

    #[test]
    fn operator_without_spaces_splits_exactly() {
        let plan = parse("ls>out", MAX_ARGS).unwrap();
        assert_eq!(plan.left, words(&["ls"]));
        assert_eq!(plan.right, words(&["out"]));

        let plan = parse("a<b", MAX_ARGS).unwrap();
        assert_eq!(plan.operator, Operator::RedirectIn);
        assert_eq!(plan.left, words(&["a"]));
        assert_eq!(plan.right, words(&["b"]));
    }

    #[test]
    fn only_first_operator_counts() {
        let plan = parse("a | b | c", MAX_ARGS).unwrap();
        assert_eq!(plan.operator, Operator::Pipe);
        assert_eq!(plan.left, words(&["a"]));
        assert_eq!(plan.right, words(&["b", "c"]));

        let plan = parse("a > b ; c", MAX_ARGS).unwrap();
        assert_eq!(plan.operator, Operator::RedirectOut);
        assert_eq!(plan.right, words(&["b", "c"]));
    }

    #[test]
    fn parens_and_tabs_separate_tokens() {
        let plan = parse("(ls\t-l)", MAX_ARGS).unwrap();
        assert_eq!(plan.operator, Operator::None);
        assert_eq!(plan.left, words(&["ls", "-l"]));
        assert!(plan.right.is_empty());
    }

    #[test]
    fn blank_and_operator_only_lines_are_empty() {
        assert!(parse("", MAX_ARGS).unwrap().is_empty());
        assert!(parse("   \t ", MAX_ARGS).unwrap().is_empty());

        let plan = parse(";", MAX_ARGS).unwrap();
        assert_eq!(plan.operator, Operator::Sequence);
        assert!(plan.is_empty());
        assert!(plan.right.is_empty());
    }

    #[test]
    fn missing_left_command_keeps_right_tokens() {
        let plan = parse("> out.txt", MAX_ARGS).unwrap();
        assert!(plan.is_empty());
        assert_eq!(plan.right, words(&["out.txt"]));
    }

    #[test]
    fn argument_limit_is_inclusive() {
        let at_limit = vec!["x"; MAX_ARGS].join(" ");
        assert_eq!(parse(&at_limit, MAX_ARGS).unwrap().left.len(), MAX_ARGS);

        let over = vec!["x"; MAX_ARGS + 1].join(" ");
        assert!(matches!(
            parse(&over, MAX_ARGS),
            Err(ShellError::TooManyArguments { limit: 100 })
        ));

        let over_right = format!("x ; {}", vec!["y"; MAX_ARGS + 1].join(" "));
        assert!(parse(&over_right, MAX_ARGS).is_err());
    }

    #[test]
    fn tokens_carry_offsets() {
        assert_eq!(tokenize(" ab  c"), vec![(1, "ab"), (5, "c")]);
    }

    #[test]
    fn operator_symbols_round_trip() {
        for c in OPERATORS {
            let op = Operator::from_char(c).unwrap();
            assert_eq!(op.symbol(), c.to_string());
        }
        assert_eq!(Operator::None.symbol(), "");
        assert_eq!(Operator::from_char('('), None);
    }
}
