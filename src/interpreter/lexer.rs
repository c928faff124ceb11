use std::fmt;

use logos::Logos;

use crate::{
    ast::{BinaryOperator, ExpressionKeyword, Keyword, Position, UnaryOperator},
    error::LexError,
    interpreter::vocabulary::{self, COMMENT_END, COMMENT_START, DIGITS, LABEL_WORD},
};

/// The character-level view of the source.
///
/// The raw lexer only splits the text into words and punctuation, skipping
/// separators and keeping track of lines. Giving those words meaning is the
/// job of [`Tokenizer`].
#[derive(Logos, Debug, PartialEq, Eq, Clone)]
#[logos(extras = LexerExtras)]
pub enum RawToken {
    /// A run of identifier characters.
    #[regex(r"[A-Za-z0-9]+", |lex| lex.slice().to_string())]
    Word(String),
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// Line breaks only move the line counter.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        lex.extras.line_start = lex.span().end;
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs, commas and dashes all separate words.
    #[regex(r"[ \t\r\f,-]+", logos::skip)]
    Ignored,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line and the byte offset where it starts, so that
/// every token can be given a line and column.
#[derive(Debug, Clone, Copy)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line:       usize,
    /// Byte offset of the first character of the current line.
    pub line_start: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line:       1,
               line_start: 0, }
    }
}

/// An operator token, either binary (infix) or unary (postfix).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Binary(BinaryOperator),
    Unary(UnaryOperator),
}

/// Words the parser consumes to build structure. They never reach the
/// program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxWord {
    /// Opens a variable reference.
    Name,
    /// Closes a variable reference.
    Rename,
    /// Opens a grouped sub-expression.
    Zip,
    /// Closes a grouped sub-expression.
    Unzip,
    /// Opens a function header.
    Use,
    /// Ends a function header as a definition.
    Code,
    /// Ends a function header as a call.
    Call,
    /// Optional argument separator.
    Bring,
    /// Optional argument separator.
    Plug,
    /// Optional statement terminator.
    Format,
}

impl SyntaxWord {
    #[must_use]
    pub const fn word(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Rename => "rename",
            Self::Zip => "zip",
            Self::Unzip => "unzip",
            Self::Use => "use",
            Self::Code => "code",
            Self::Call => "call",
            Self::Bring => "bring",
            Self::Plug => "plug",
            Self::Format => "format",
        }
    }
}

/// Represents a lexical token of the language.
///
/// Filler words and comments are already gone at this point, synonyms are
/// normalized and fixed continuations have been checked.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// `(` or `)`.
    Punctuation(char),
    /// A binary or unary operator word.
    Operator(Operator),
    /// A digit word carrying its positional value (0 to 10).
    Digit(u8),
    /// A statement or control-flow keyword.
    Keyword(Keyword),
    /// A structural word consumed by the parser.
    Syntax(SyntaxWord),
    /// The jump label marker.
    Label,
    /// A keyword that yields a value.
    ExpressionKeyword(ExpressionKeyword),
    /// Any word without meaning in the language.
    Variable(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Punctuation(c) => write!(f, "'{c}'"),
            Self::Operator(Operator::Binary(op)) => write!(f, "operator '{}'", op.symbol()),
            Self::Operator(Operator::Unary(op)) => write!(f, "operator '{}'", op.symbol()),
            Self::Digit(d) => match DIGITS.get(usize::from(*d)) {
                Some(word) => write!(f, "digit '{word}'"),
                None => write!(f, "digit {d}"),
            },
            Self::Keyword(keyword) => write!(f, "keyword '{}'", keyword.word()),
            Self::Syntax(syntax) => write!(f, "'{}'", syntax.word()),
            Self::Label => write!(f, "label '{LABEL_WORD}'"),
            Self::ExpressionKeyword(keyword) => write!(f, "'{}'", keyword.word()),
            Self::Variable(name) => write!(f, "identifier '{name}'"),
        }
    }
}

/// Turns source text into tokens with a single pass and no backtracking.
///
/// The tokenizer is an iterator; every item is either a token paired with
/// the position of its first character or the first lexical error met.
pub struct Tokenizer<'s> {
    lexer: logos::Lexer<'s, RawToken>,
}

impl<'s> Tokenizer<'s> {
    #[must_use]
    pub fn new(source: &'s str) -> Self {
        Self { lexer: RawToken::lexer_with_extras(source, LexerExtras::default()) }
    }

    /// Position of the raw token most recently read.
    fn token_position(&self) -> Position {
        let extras = &self.lexer.extras;
        Position::new(extras.line,
                      self.lexer.span().start.saturating_sub(extras.line_start) + 1)
    }

    /// Reads the next raw word, skipping filler. Punctuation and stray
    /// characters are returned as their text.
    fn next_plain_word(&mut self) -> Option<String> {
        loop {
            match self.lexer.next()? {
                Ok(RawToken::Word(word)) if vocabulary::is_filler(&word) => {},
                Ok(RawToken::Word(word)) => return Some(word),
                _ => return Some(self.lexer.slice().to_string()),
            }
        }
    }

    /// Discards everything up to and including the comment end word.
    fn skip_comment(&mut self) {
        while let Some(raw) = self.lexer.next() {
            if let Ok(RawToken::Word(word)) = raw
               && word == COMMENT_END
            {
                return;
            }
        }
    }

    /// Checks that `keyword` is followed by each word of `phrase`.
    fn expect_phrase(&mut self,
                     keyword: &str,
                     phrase: &'static [&'static str],
                     position: Position)
                     -> Result<(), LexError> {
        for &expected in phrase {
            match self.next_plain_word() {
                Some(found) if found == expected => {},
                found => {
                    return Err(LexError::BrokenContinuation { keyword: keyword.to_string(),
                                                              expected,
                                                              found,
                                                              position });
                },
            }
        }
        Ok(())
    }

    /// Gives a word its meaning. Returns `None` for words that produce no
    /// token.
    fn classify(&mut self, raw: &str, position: Position) -> Result<Option<Token>, LexError> {
        let word = vocabulary::canonical(raw);

        if vocabulary::is_filler(word) {
            return Ok(None);
        }
        if word == COMMENT_START {
            self.skip_comment();
            return Ok(None);
        }
        if word == LABEL_WORD {
            return Ok(Some(Token::Label));
        }
        if let Some(value) = vocabulary::digit_value(word) {
            return Ok(Some(Token::Digit(value)));
        }
        if let Some(op) = vocabulary::operator(word) {
            if let Some(phrase) = vocabulary::continuation(word) {
                self.expect_phrase(word, phrase, position)?;
            }
            return Ok(Some(Token::Operator(op)));
        }
        if let Some(keyword) = vocabulary::keyword(word) {
            return Ok(Some(Token::Keyword(keyword)));
        }
        if let Some(syntax) = vocabulary::syntax_word(word) {
            return Ok(Some(Token::Syntax(syntax)));
        }
        if let Some(keyword) = vocabulary::expression_keyword(word) {
            return Ok(Some(Token::ExpressionKeyword(keyword)));
        }

        // The tokenizer cannot know where a name is allowed, so every
        // unknown word is a variable and the parser decides.
        Ok(Some(Token::Variable(word.to_string())))
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<(Token, Position), LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let raw = self.lexer.next()?;
            let position = self.token_position();

            let word = match raw {
                Ok(RawToken::Word(word)) => word,
                Ok(RawToken::LParen) => return Some(Ok((Token::Punctuation('('), position))),
                Ok(RawToken::RParen) => return Some(Ok((Token::Punctuation(')'), position))),
                Ok(RawToken::NewLine | RawToken::Ignored) => continue,
                Err(()) => {
                    return Some(Err(LexError::UnexpectedCharacter { character:
                                                                        self.lexer
                                                                            .slice()
                                                                            .to_string(),
                                                                    position }));
                },
            };

            match self.classify(&word, position) {
                Ok(Some(token)) => return Some(Ok((token, position))),
                Ok(None) => {},
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Tokenizes a whole source text.
///
/// # Errors
/// Returns the first [`LexError`] met.
///
/// # Example
/// ```
/// use technologic::{
///     ast::Keyword,
///     interpreter::lexer::{Token, tokenize},
/// };
///
/// let tokens = tokenize("view it, send it").unwrap();
/// let tokens: Vec<Token> = tokens.into_iter().map(|(token, _)| token).collect();
/// assert_eq!(tokens, vec![Token::Digit(3), Token::Keyword(Keyword::Send)]);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, Position)>, LexError> {
    Tokenizer::new(source).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> Vec<Token> {
        tokenize(source).unwrap().into_iter().map(|(token, _)| token).collect()
    }

    #[test]
    fn filler_words_are_dropped() {
        assert_eq!(tokens("quick - print it, mail"), vec![Token::Keyword(Keyword::Print)]);
    }

    #[test]
    fn synonyms_are_normalized() {
        assert_eq!(tokens("rate tune snap rewrite"),
                   vec![Token::Keyword(Keyword::Check),
                        Token::Keyword(Keyword::Fix),
                        Token::Keyword(Keyword::Jam),
                        Token::Keyword(Keyword::Write)]);
    }

    #[test]
    fn comments_are_skipped_including_punctuation() {
        assert_eq!(tokens("pause this (is) ignored! play send"),
                   vec![Token::Keyword(Keyword::Send)]);
    }

    #[test]
    fn unterminated_comment_runs_to_end() {
        assert_eq!(tokens("send pause never closed"), vec![Token::Keyword(Keyword::Send)]);
    }

    #[test]
    fn drag_and_drop_is_one_operator() {
        assert_eq!(tokens("click drag it and drop it click"),
                   vec![Token::Digit(1),
                        Token::Operator(Operator::Binary(BinaryOperator::Equal)),
                        Token::Digit(1)]);
    }

    #[test]
    fn drag_without_drop_is_rejected() {
        let err = tokenize("click drag and click").unwrap_err();
        assert!(matches!(err,
                         LexError::BrokenContinuation { expected: "drop",
                                                        found: Some(ref found),
                                                        .. } if found == "click"));
    }

    #[test]
    fn drag_at_end_of_input_is_rejected() {
        let err = tokenize("drag").unwrap_err();
        assert!(matches!(err,
                         LexError::BrokenContinuation { expected: "and",
                                                        found: None,
                                                        .. }));
    }

    #[test]
    fn unknown_words_become_variables() {
        assert_eq!(tokens("counter"), vec![Token::Variable("counter".to_string())]);
    }

    #[test]
    fn punctuation_and_labels() {
        assert_eq!(tokens("( technologic ) fax"),
                   vec![Token::Punctuation('('),
                        Token::Label,
                        Token::Punctuation(')'),
                        Token::ExpressionKeyword(ExpressionKeyword::Pop)]);
    }

    #[test]
    fn positions_track_lines_and_columns() {
        let tokens = tokenize("send\n  quick print").unwrap();
        assert_eq!(tokens[0].1, Position::new(1, 1));
        assert_eq!(tokens[1].1, Position::new(2, 9));
    }

    #[test]
    fn stray_characters_are_errors() {
        let err = tokenize("send;").unwrap_err();
        assert_eq!(err,
                   LexError::UnexpectedCharacter { character: ";".to_string(),
                                                   position:  Position::new(1, 5), });
    }
}
