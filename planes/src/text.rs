use std::fmt;

/// Outcome of a game from White's point of view
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResultLabel {
    Win,
    Lose,
    Draw,
    /// Text that did not match any result marker, kept as is
    Unknown(String),
}

impl ResultLabel {
    fn from_text(text: String) -> Self {
        match text.as_str() {
            "win" => ResultLabel::Win,
            "lose" => ResultLabel::Lose,
            "draw" => ResultLabel::Draw,
            _ => ResultLabel::Unknown(text),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ResultLabel::Unknown(_))
    }
}

impl fmt::Display for ResultLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultLabel::Win => write!(f, "win"),
            ResultLabel::Lose => write!(f, "lose"),
            ResultLabel::Draw => write!(f, "draw"),
            ResultLabel::Unknown(text) => write!(f, "{}", text),
        }
    }
}

/// Removes the last `n` characters of a string (all of it if it is shorter)
fn strip_terminator(raw: &str, n: usize) -> &str {
    match raw.char_indices().rev().nth(n - 1) {
        Some((index, _)) => &raw[..index],
        None => "",
    }
}

/// Extracts the SAN tokens from a move line taken out of a PGN file,
/// e.g. `"1. e4 e5 2. Nf3 Nc6 3. Bb5\r\n"`.
///
/// The line is split into ply groups on `". "`. Inside a group the third
/// token is the next move number (or an annotation) and is dropped. The first
/// group only holds what was before `"1."` and is discarded.
pub fn parse_moves(raw: &str) -> Vec<String> {
    let text = strip_terminator(raw, 2);

    text.split(". ")
        .skip(1)
        .flat_map(|group| {
            let mut tokens: Vec<&str> = group.split(' ').collect();
            if tokens.len() > 2 {
                tokens.remove(2);
            }
            tokens
        })
        // trailing spaces leave empty tokens behind
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Labels one raw result string, e.g. `"1-0\n"`
pub fn parse_result(raw: &str) -> ResultLabel {
    let text = strip_terminator(raw, 1)
        .replace("1-0", "win")
        .replace("0-1", "lose")
        .replace("1/2-1/2", "draw");

    ResultLabel::from_text(text)
}

pub fn parse_results<S: AsRef<str>>(raw_list: &[S]) -> Vec<ResultLabel> {
    raw_list.iter().map(|raw| parse_result(raw.as_ref())).collect()
}

/// Labels the value of a PGN `Result` header (no terminator)
pub fn result_from_marker(marker: &str) -> ResultLabel {
    match marker.trim() {
        "1-0" => ResultLabel::Win,
        "0-1" => ResultLabel::Lose,
        "1/2-1/2" => ResultLabel::Draw,
        other => ResultLabel::Unknown(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moves_scenario() {
        assert_eq!(parse_moves("1. e4 e5 2. Nf3 1\n"), vec!["e4", "e5", "Nf3"]);
    }

    #[test]
    fn test_moves_drop_move_numbers() {
        let moves = parse_moves("1. e4 c5 2. Nf3 d6 3. d4 cxd4 4. Nxd4 Nf6\r\n");
        assert_eq!(
            moves,
            vec!["e4", "c5", "Nf3", "d6", "d4", "cxd4", "Nxd4", "Nf6"]
        );
    }

    #[test]
    fn test_moves_odd_ply_count() {
        let moves = parse_moves("1. f3 e5 2. g4 Qh4#\r\n");
        assert_eq!(moves, vec!["f3", "e5", "g4", "Qh4#"]);

        let moves = parse_moves("1. d4 d5 2. c4\r\n");
        assert_eq!(moves, vec!["d4", "d5", "c4"]);
    }

    #[test]
    fn test_moves_short_groups_pass_through() {
        // a single group without a third token is left alone
        assert_eq!(parse_moves("1. e4\r\n"), vec!["e4"]);
    }

    #[test]
    fn test_moves_degenerate_input() {
        assert!(parse_moves("").is_empty());
        assert!(parse_moves("\n").is_empty());
        assert!(parse_moves("no move numbers\r\n").is_empty());
    }

    #[test]
    fn test_results() {
        assert_eq!(parse_result("1-0\n"), ResultLabel::Win);
        assert_eq!(parse_result("0-1\n"), ResultLabel::Lose);
        assert_eq!(parse_result("1/2-1/2\n"), ResultLabel::Draw);

        let labels = parse_results(&["1-0\n", "*\n", "1/2-1/2\n"]);
        assert_eq!(
            labels,
            vec![
                ResultLabel::Win,
                ResultLabel::Unknown("*".to_string()),
                ResultLabel::Draw
            ]
        );
    }

    #[test]
    fn test_results_unknown_passes_through() {
        let label = parse_result("abandoned\n");
        assert_eq!(label, ResultLabel::Unknown("abandoned".to_string()));
        assert_eq!(label.to_string(), "abandoned");
        assert!(!label.is_known());

        // substituted but not a bare marker
        assert_eq!(
            parse_result("1-0 (time)\n"),
            ResultLabel::Unknown("win (time)".to_string())
        );
    }

    #[test]
    fn test_result_markers() {
        assert_eq!(result_from_marker("1-0"), ResultLabel::Win);
        assert_eq!(result_from_marker(" 0-1 "), ResultLabel::Lose);
        assert_eq!(result_from_marker("1/2-1/2"), ResultLabel::Draw);
        assert_eq!(result_from_marker("*"), ResultLabel::Unknown("*".into()));
    }
}
