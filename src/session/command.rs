//! Command language
//!
//! One command per line. `#` starts a comment; blank lines are skipped.

/// A parsed script command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Create { id: String, parents: Vec<String> },
    Connect { child: String, parent: String },
    Remove(String),
    /// Remove, then cascade to strains left without parents
    Prune(String),
    Exists(String),
    Get(String),
    Parents(String),
    Children(String),
    Ancestors(String),
    Descendants(String),
    Orphans,
    Stem,
    Dump,
}

/// Keyword and argument synopsis of every command
pub const SYNOPSIS: &[(&str, &str)] = &[
    ("create", "<id> <parent> [<parent>...]"),
    ("connect", "<child> <parent>"),
    ("remove", "<id>"),
    ("prune", "<id>"),
    ("exists", "<id>"),
    ("get", "<id>"),
    ("parents", "<id>"),
    ("children", "<id>"),
    ("ancestors", "<id>"),
    ("descendants", "<id>"),
    ("orphans", ""),
    ("stem", ""),
    ("dump", ""),
];

impl Command {
    /// Parse one line of a script
    ///
    /// # Returns
    /// `None` for blank and comment-only lines.
    ///
    /// # Errors
    /// A message naming the unknown keyword or the expected arguments.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let code = match line.split_once('#') {
            Some((code, _comment)) => code,
            None => line,
        };
        let mut tokens = code.split_whitespace();
        let Some(keyword) = tokens.next() else {
            return Ok(None);
        };
        let args: Vec<String> = tokens.map(str::to_string).collect();

        let command = match (keyword, args.as_slice()) {
            ("create", [id, parents @ ..]) if !parents.is_empty() => Self::Create {
                id: id.clone(),
                parents: parents.to_vec(),
            },
            ("connect", [child, parent]) => Self::Connect {
                child: child.clone(),
                parent: parent.clone(),
            },
            ("remove", [id]) => Self::Remove(id.clone()),
            ("prune", [id]) => Self::Prune(id.clone()),
            ("exists", [id]) => Self::Exists(id.clone()),
            ("get", [id]) => Self::Get(id.clone()),
            ("parents", [id]) => Self::Parents(id.clone()),
            ("children", [id]) => Self::Children(id.clone()),
            ("ancestors", [id]) => Self::Ancestors(id.clone()),
            ("descendants", [id]) => Self::Descendants(id.clone()),
            ("orphans", []) => Self::Orphans,
            ("stem", []) => Self::Stem,
            ("dump", []) => Self::Dump,
            _ => return Err(Self::usage_error(keyword)),
        };
        Ok(Some(command))
    }

    fn usage_error(keyword: &str) -> String {
        match SYNOPSIS.iter().find(|(name, _)| *name == keyword) {
            Some((name, args)) if args.is_empty() => format!("usage: {}", name),
            Some((name, args)) => format!("usage: {} {}", name, args),
            None => format!("unknown command `{}`", keyword),
        }
    }

    /// Whether the command can change the genealogy
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::Create { .. } | Self::Connect { .. } | Self::Remove(_) | Self::Prune(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_create_with_parents() {
        assert_eq!(
            Command::parse("create b a c").unwrap(),
            Some(Command::Create {
                id: "b".into(),
                parents: vec!["a".into(), "c".into()],
            })
        );
    }

    #[test]
    fn test_parse_skips_blank_and_comments() {
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(Command::parse("   \t").unwrap(), None);
        assert_eq!(Command::parse("# a comment").unwrap(), None);
        assert_eq!(
            Command::parse("remove x   # trailing").unwrap(),
            Some(Command::Remove("x".into()))
        );
    }

    #[test]
    fn test_parse_arity_errors() {
        assert_eq!(
            Command::parse("create b").unwrap_err(),
            "usage: create <id> <parent> [<parent>...]"
        );
        assert_eq!(
            Command::parse("connect a").unwrap_err(),
            "usage: connect <child> <parent>"
        );
        assert_eq!(Command::parse("dump now").unwrap_err(), "usage: dump");
    }

    #[test]
    fn test_parse_unknown_keyword() {
        assert_eq!(
            Command::parse("mutate a").unwrap_err(),
            "unknown command `mutate`"
        );
    }

    #[test]
    fn test_every_synopsis_keyword_parses() {
        for (keyword, args) in SYNOPSIS {
            let line = format!("{} {}", keyword, args.replace(" [<parent>...]", ""));
            assert!(
                Command::parse(&line).unwrap().is_some(),
                "`{}` did not parse",
                line
            );
        }
    }

    #[test]
    fn test_is_mutation() {
        assert!(Command::Prune("a".into()).is_mutation());
        assert!(!Command::Orphans.is_mutation());
    }
}
