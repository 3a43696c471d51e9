// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Command trees built from clap commands
//!
//! A tree is a list of [`CommandNode`]s, each wrapping a `clap::Command`
//! with an optional action tag and child nodes. Dispatching a line walks
//! clap's matches down to the deepest node and hands back its action
//! together with the parsed arguments.

use clap::{Arg, ArgMatches, Command};

/// Errors raised while turning a line of input into an [`Invocation`].
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("failed to tokenize input: {0}")]
    Tokenize(#[from] shell_words::ParseError),

    #[error(transparent)]
    Parse(#[from] clap::Error),

    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("'{0}' requires a subcommand")]
    NoAction(String),
}

impl DispatchError {
    /// Print the error for the user. Clap errors carry their own usage text.
    pub fn report(&self) {
        match self {
            DispatchError::Parse(err) => {
                if let Err(io_err) = err.print() {
                    tracing::debug!("Failed to print parse error: {}", io_err);
                }
            }
            other => eprintln!("{other}"),
        }
    }
}

/// A matched command ready to execute.
#[derive(Debug, Clone)]
pub struct Invocation<A> {
    pub action: A,
    pub matches: ArgMatches,
    pub path: Vec<String>,
}

/// A named command with its argument schema, action tag and children.
pub struct CommandNode<A> {
    command: Command,
    action: Option<A>,
    children: Vec<CommandNode<A>>,
}

impl<A> CommandNode<A> {
    pub fn new(name: &'static str, about: &'static str) -> Self {
        Self {
            command: Command::new(name).about(about),
            action: None,
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.command.get_name()
    }

    /// Declare an argument or flag for this command.
    pub fn arg(mut self, arg: Arg) -> Self {
        self.command = self.command.arg(arg);
        self
    }

    /// Attach the action executed when this node is the deepest match.
    pub fn action(mut self, action: A) -> Self {
        self.action = Some(action);
        self
    }

    /// Add a child command. A child whose name is already taken is dropped.
    pub fn child(mut self, child: CommandNode<A>) -> Self {
        push_unique(&mut self.children, child);
        self
    }

    pub fn children(&self) -> &[CommandNode<A>] {
        &self.children
    }

    fn build(&self) -> Command {
        let mut command = self.command.clone();
        for child in &self.children {
            command = command.subcommand(child.build());
        }
        if self.action.is_none() && !self.children.is_empty() {
            command = command
                .subcommand_required(true)
                .arg_required_else_help(true);
        }
        command
    }
}

/// The command vocabulary of one state.
pub struct CommandTree<A> {
    name: &'static str,
    nodes: Vec<CommandNode<A>>,
}

impl<A> CommandTree<A> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            nodes: Vec::new(),
        }
    }

    /// Mount a top-level command. A command whose name is already taken is dropped.
    pub fn command(mut self, node: CommandNode<A>) -> Self {
        push_unique(&mut self.nodes, node);
        self
    }

    pub fn commands(mut self, nodes: impl IntoIterator<Item = CommandNode<A>>) -> Self {
        for node in nodes {
            push_unique(&mut self.nodes, node);
        }
        self
    }

    /// Top-level command names in mount order.
    pub fn names(&self) -> Vec<&str> {
        self.nodes.iter().map(CommandNode::name).collect()
    }

    fn build(&self) -> Command {
        let mut root = Command::new(self.name)
            .no_binary_name(true)
            .subcommand_required(true)
            .disable_help_flag(true)
            .disable_version_flag(true);
        for node in &self.nodes {
            root = root.subcommand(node.build());
        }
        root
    }
}

impl<A: Clone> CommandTree<A> {
    /// Parse `line` against this tree.
    ///
    /// Returns `Ok(None)` for a blank line.
    pub fn dispatch(&self, line: &str) -> Result<Option<Invocation<A>>, DispatchError> {
        let tokens = shell_words::split(line)?;
        if tokens.is_empty() {
            return Ok(None);
        }

        let matches = self.build().try_get_matches_from(tokens)?;

        let mut nodes = self.nodes.as_slice();
        let mut current = &matches;
        let mut path = Vec::new();
        while let Some((name, sub)) = current.subcommand() {
            let node = nodes
                .iter()
                .find(|node| node.name() == name)
                .ok_or_else(|| DispatchError::Unknown(name.to_string()))?;
            path.push(name.to_string());

            if sub.subcommand().is_none() {
                return match &node.action {
                    Some(action) => Ok(Some(Invocation {
                        action: action.clone(),
                        matches: sub.clone(),
                        path,
                    })),
                    None => Err(DispatchError::NoAction(path.join(" "))),
                };
            }

            nodes = node.children.as_slice();
            current = sub;
        }

        Err(DispatchError::NoAction(path.join(" ")))
    }
}

fn push_unique<A>(nodes: &mut Vec<CommandNode<A>>, node: CommandNode<A>) {
    if nodes.iter().any(|existing| existing.name() == node.name()) {
        tracing::warn!("Duplicate command '{}' ignored", node.name());
        return;
    }
    nodes.push(node);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[derive(Debug, Clone, PartialEq)]
    enum Action {
        List,
        Show,
        Quit,
    }

    fn tree() -> CommandTree<Action> {
        CommandTree::new("test")
            .command(
                CommandNode::new("list", "list things")
                    .arg(
                        Arg::new("limit")
                            .long("limit")
                            .value_parser(clap::value_parser!(u32))
                            .default_value("10"),
                    )
                    .action(Action::List),
            )
            .command(
                CommandNode::new("show", "show things").child(
                    CommandNode::new("item", "show one item")
                        .arg(Arg::new("name").required(true))
                        .action(Action::Show),
                ),
            )
            .command(CommandNode::new("quit", "leave").action(Action::Quit))
    }

    #[test]
    fn test_dispatch_top_level() {
        let invocation = tree().dispatch("list").unwrap().unwrap();
        assert_eq!(invocation.action, Action::List);
        assert_eq!(invocation.path, vec!["list"]);
        assert_eq!(invocation.matches.get_one::<u32>("limit"), Some(&10));
    }

    #[test]
    fn test_dispatch_nested_with_quoting() {
        let invocation = tree().dispatch("show item 'two words'").unwrap().unwrap();
        assert_eq!(invocation.action, Action::Show);
        assert_eq!(invocation.path, vec!["show", "item"]);
        assert_eq!(
            invocation.matches.get_one::<String>("name").map(String::as_str),
            Some("two words")
        );
    }

    #[test]
    fn test_blank_line_is_not_a_command() {
        assert!(tree().dispatch("   ").unwrap().is_none());
    }

    #[test]
    fn test_unknown_command_is_parse_error() {
        assert!(matches!(
            tree().dispatch("frobnicate"),
            Err(DispatchError::Parse(_))
        ));
    }

    #[test]
    fn test_bad_argument_is_parse_error() {
        assert!(matches!(
            tree().dispatch("list --limit many"),
            Err(DispatchError::Parse(_))
        ));
    }

    #[test]
    fn test_group_without_subcommand_is_error() {
        assert!(tree().dispatch("show").is_err());
    }

    #[test]
    fn test_unbalanced_quote_is_tokenize_error() {
        assert!(matches!(
            tree().dispatch("show item 'oops"),
            Err(DispatchError::Tokenize(_))
        ));
    }

    #[test]
    fn test_help_is_available() {
        match tree().dispatch("help") {
            Err(DispatchError::Parse(err)) => assert_eq!(err.kind(), ErrorKind::DisplayHelp),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let tree = tree().command(CommandNode::new("list", "again").action(Action::Quit));
        assert_eq!(tree.names(), vec!["list", "show", "quit"]);
        let invocation = tree.dispatch("list").unwrap().unwrap();
        assert_eq!(invocation.action, Action::List);

        let node = CommandNode::<Action>::new("group", "")
            .child(CommandNode::new("a", ""))
            .child(CommandNode::new("a", ""));
        assert_eq!(node.children().len(), 1);
    }
}
