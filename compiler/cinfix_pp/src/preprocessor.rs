//! The directive-driven text pass.

use std::path::Path;

use cinfix_lexer::{tokenize, InternedString, Location, Token, TokenType};
use log::{debug, info};

use crate::conditional::ConditionalStack;
use crate::config::PreprocessorConfig;
use crate::error::{PreprocessError, PreprocessErrorKind};
use crate::expression::evaluate_condition;
use crate::loader::{FsLoader, SourceLoader};
use crate::macros::{text_len, trim_trivia, MacroTable};

/// File name reported for macros defined through [`Preprocessor::define`].
const COMMAND_LINE: &str = "<command line>";

/// Preprocessing context. Macros persist across calls until [`reset`] is
/// called, so one context can process several files that share definitions.
///
/// [`reset`]: Preprocessor::reset
pub struct Preprocessor {
    config: PreprocessorConfig,
    macros: MacroTable,
    loader: Box<dyn SourceLoader>,
}

/// The file being processed, for error locations and relative includes.
struct SourceFile<'a> {
    name: &'a str,
    path: Option<&'a Path>,
    depth: usize,
}

impl SourceFile<'_> {
    fn error(&self, line: usize, kind: PreprocessErrorKind) -> PreprocessError {
        PreprocessError {
            file: self.name.to_string(),
            line,
            kind,
        }
    }
}

/// The rest of a directive line, with continuations joined.
struct DirectiveLine {
    tokens: Vec<Token>,
    /// Line breaks consumed, including the one ending the directive
    newlines: usize,
    /// Where the directive's text ends
    end: Location,
}

/// Walks a token vector and hands out whole directive lines.
struct Cursor {
    tokens: Vec<Token>,
    pos: usize,
    end: Location,
}

impl Cursor {
    fn new(tokens: Vec<Token>) -> Self {
        let end = tokens.last().map(|t| t.location).unwrap_or_default();
        Self {
            tokens,
            pos: 0,
            end,
        }
    }

    fn next(&mut self) -> Token {
        match self.tokens.get(self.pos) {
            Some(token) => {
                self.pos += 1;
                token.clone()
            }
            None => Token::eof(self.end),
        }
    }

    fn peek_type(&self) -> Option<TokenType> {
        self.tokens.get(self.pos).map(|t| t.token_type)
    }

    /// Consumes tokens through the next newline. A `\` directly before a
    /// newline joins the following line and stands for a single space.
    fn rest_of_line(&mut self) -> DirectiveLine {
        let mut tokens = Vec::new();
        let mut newlines = 0;
        let end = loop {
            let token = self.next();
            match token.token_type {
                TokenType::Eof => break token.location,
                TokenType::Newline => {
                    newlines += 1;
                    break token.location;
                }
                TokenType::Backslash if self.peek_type() == Some(TokenType::Newline) => {
                    self.pos += 1;
                    newlines += 1;
                    tokens.push(Token::new(TokenType::Whitespace, " ", token.location));
                }
                _ => {
                    newlines += line_breaks(&token);
                    tokens.push(token);
                }
            }
        };
        DirectiveLine {
            tokens,
            newlines,
            end,
        }
    }
}

fn line_breaks(token: &Token) -> usize {
    token.text().matches('\n').count()
}

/// Splits off the first meaningful token of a directive line.
fn first_word(tokens: &[Token]) -> Option<(&Token, &[Token])> {
    let index = tokens.iter().position(|t| !t.is_trivia())?;
    Some((&tokens[index], &tokens[index + 1..]))
}

/// The identifier a directive like `#ifdef NAME` names.
fn macro_name<'a>(
    tokens: &'a [Token],
    directive: &'static str,
) -> Result<(InternedString, &'a [Token]), PreprocessErrorKind> {
    match first_word(tokens) {
        Some((token, rest)) if token.token_type == TokenType::Identifier => {
            Ok((token.lexeme.clone(), rest))
        }
        _ => Err(PreprocessErrorKind::MissingMacroName(directive)),
    }
}

impl Preprocessor {
    /// Creates a context that loads includes from disk.
    pub fn new(config: PreprocessorConfig) -> Self {
        let loader = FsLoader::new(config.include_dirs.clone());
        Self::with_loader(config, Box::new(loader))
    }

    /// Creates a context with a custom include loader.
    pub fn with_loader(config: PreprocessorConfig, loader: Box<dyn SourceLoader>) -> Self {
        Self {
            config,
            macros: MacroTable::new(),
            loader,
        }
    }

    /// Forgets every macro.
    pub fn reset(&mut self) {
        self.macros.clear();
    }

    pub fn macros(&self) -> &MacroTable {
        &self.macros
    }

    /// Defines an object-like macro as `#define NAME BODY` would. Only the
    /// first line of `body` is used.
    pub fn define(&mut self, name: &str, body: &str) -> Result<(), PreprocessError> {
        let origin = SourceFile {
            name: COMMAND_LINE,
            path: None,
            depth: 0,
        };
        let name_tokens = tokenize(name);
        let (name, rest) = macro_name(&name_tokens, "#define").map_err(|k| origin.error(0, k))?;
        if first_word(rest).is_some_and(|(t, _)| t.token_type != TokenType::Eof) {
            return Err(origin.error(0, PreprocessErrorKind::MissingMacroName("#define")));
        }
        let body: Vec<Token> = tokenize(body)
            .into_iter()
            .take_while(|t| !t.token_type.is_line_end())
            .collect();
        self.store_macro(name, body).map_err(|k| origin.error(0, k))
    }

    pub fn undef(&mut self, name: &str) -> bool {
        self.macros.undef(name)
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.macros.is_defined(name)
    }

    /// Preprocesses a file loaded through the include loader.
    pub fn process_file<P: AsRef<Path>>(&mut self, path: P) -> Result<String, PreprocessError> {
        let name = path.as_ref().display().to_string();
        let (resolved, text) = self.loader.load(&name, None).map_err(|source| PreprocessError {
            file: name.clone(),
            line: 0,
            kind: PreprocessErrorKind::IncludeFailed {
                path: name.clone(),
                source,
            },
        })?;
        let file = SourceFile {
            name: &name,
            path: Some(&resolved),
            depth: 1,
        };
        let mut out = String::with_capacity(text.len());
        self.process_source(&file, &text, &mut out)?;
        info!("preprocessed {} ({} bytes out)", name, out.len());
        Ok(out)
    }

    /// Preprocesses text held in memory. `name` is used in error messages;
    /// includes resolve as if the text were a file in the working directory.
    pub fn process_str(&mut self, name: &str, source: &str) -> Result<String, PreprocessError> {
        let file = SourceFile {
            name,
            path: None,
            depth: 1,
        };
        let mut out = String::with_capacity(source.len());
        self.process_source(&file, source, &mut out)?;
        Ok(out)
    }

    fn process_source(
        &mut self,
        file: &SourceFile<'_>,
        source: &str,
        out: &mut String,
    ) -> Result<(), PreprocessError> {
        let mut cursor = Cursor::new(tokenize(source));
        let mut conditionals = ConditionalStack::new(self.config.max_conditional_depth);
        let mut line_start = true;
        // Whitespace opening a line is held back until we know the line is
        // not a directive.
        let mut indent = String::new();

        let end = loop {
            let token = cursor.next();
            match token.token_type {
                TokenType::Eof => break token.location,
                TokenType::UnterminatedComment => {
                    return Err(file.error(
                        token.location.line,
                        PreprocessErrorKind::UnterminatedComment,
                    ));
                }
                // `#` opens a directive only as the first token of a line.
                TokenType::Pound if line_start => {
                    indent.clear();
                    let line = cursor.rest_of_line();
                    if let Some(comment) = line
                        .tokens
                        .iter()
                        .find(|t| t.token_type == TokenType::UnterminatedComment)
                    {
                        return Err(file.error(
                            comment.location.line,
                            PreprocessErrorKind::UnterminatedComment,
                        ));
                    }
                    self.directive(file, token.location.line, &line, &mut conditionals, out)?;
                    out.extend(std::iter::repeat('\n').take(line.newlines));
                }
                TokenType::Newline => {
                    out.push_str(&indent);
                    indent.clear();
                    out.push('\n');
                    line_start = true;
                }
                TokenType::Whitespace if !conditionals.is_active() => {}
                TokenType::Whitespace if line_start => indent.push_str(token.text()),
                TokenType::Whitespace => out.push_str(token.text()),
                _ => {
                    line_start = false;
                    out.push_str(&indent);
                    indent.clear();
                    if !conditionals.is_active() {
                        out.extend(std::iter::repeat('\n').take(line_breaks(&token)));
                    } else if token.token_type == TokenType::Identifier
                        && self.macros.is_defined(token.text())
                    {
                        for expanded in self.macros.expand(std::slice::from_ref(&token)) {
                            out.push_str(expanded.text());
                        }
                    } else {
                        out.push_str(token.text());
                    }
                }
            }
        };

        conditionals
            .finish()
            .map_err(|kind| file.error(end.line, kind))
    }

    fn directive(
        &mut self,
        file: &SourceFile<'_>,
        line: usize,
        directive: &DirectiveLine,
        conditionals: &mut ConditionalStack,
        out: &mut String,
    ) -> Result<(), PreprocessError> {
        // A lone `#` is the null directive.
        let Some((name, rest)) = first_word(&directive.tokens) else {
            return Ok(());
        };
        let active = conditionals.is_active();
        debug!(
            "{}:{}: #{}{}",
            file.name,
            line,
            name.text(),
            if active { "" } else { " (skipped)" }
        );
        let at = |kind| file.error(line, kind);

        let keyword = match name.token_type {
            TokenType::Identifier => name.text(),
            _ if active => return Err(at(PreprocessErrorKind::UnknownDirective(name.text().into()))),
            _ => return Ok(()),
        };

        match keyword {
            "if" => {
                let condition = active && self.condition(rest, directive.end).map_err(at)?;
                conditionals.push(condition, line).map_err(at)
            }
            "ifdef" | "ifndef" => {
                let condition = if active {
                    let label = if keyword == "ifdef" { "#ifdef" } else { "#ifndef" };
                    let (macro_name, _) = macro_name(rest, label).map_err(at)?;
                    self.macros.is_defined(macro_name.as_str()) == (keyword == "ifdef")
                } else {
                    false
                };
                conditionals.push(condition, line).map_err(at)
            }
            "elif" => {
                let condition = conditionals.elif_needs_condition().map_err(at)?
                    && self.condition(rest, directive.end).map_err(at)?;
                conditionals.elif(condition).map_err(at)
            }
            "else" => conditionals.else_branch().map_err(at),
            "endif" => conditionals.endif().map_err(at),
            // Everything else is ignored inside a skipped region.
            _ if !active => Ok(()),
            "define" => {
                let (macro_name, body) = macro_name(rest, "#define").map_err(at)?;
                // `NAME(` with no space between declares parameters.
                if body.first().map(|t| t.token_type) == Some(TokenType::LeftParen) {
                    return Err(at(PreprocessErrorKind::FunctionLikeMacro(
                        macro_name.to_string(),
                    )));
                }
                self.store_macro(macro_name, body.to_vec()).map_err(at)
            }
            "undef" => {
                let (macro_name, _) = macro_name(rest, "#undef").map_err(at)?;
                self.macros.undef(macro_name.as_str());
                Ok(())
            }
            "include" => self.include(file, line, rest, out),
            other => Err(at(PreprocessErrorKind::UnknownDirective(other.to_string()))),
        }
    }

    fn condition(&self, tokens: &[Token], end: Location) -> Result<bool, PreprocessErrorKind> {
        evaluate_condition(tokens, &self.macros, &self.config.parser, end)
    }

    fn store_macro(&mut self, name: InternedString, body: Vec<Token>) -> Result<(), PreprocessErrorKind> {
        let body = trim_trivia(body);
        if text_len(&body) > self.config.max_macro_len {
            return Err(PreprocessErrorKind::MacroTooLong {
                name: name.to_string(),
                limit: self.config.max_macro_len,
            });
        }
        self.macros.define(name, body);
        Ok(())
    }

    fn include(
        &mut self,
        file: &SourceFile<'_>,
        line: usize,
        tokens: &[Token],
        out: &mut String,
    ) -> Result<(), PreprocessError> {
        let at = |kind| file.error(line, kind);
        let path = match first_word(tokens) {
            Some((token, _)) if token.token_type == TokenType::StringLiteral => {
                let text = token.text();
                text[1..text.len() - 1].to_string()
            }
            Some((token, _)) => return Err(at(PreprocessErrorKind::BadInclude(token.text().into()))),
            None => return Err(at(PreprocessErrorKind::BadInclude(String::new()))),
        };
        if file.depth >= self.config.max_include_depth {
            return Err(at(PreprocessErrorKind::IncludeTooDeep(
                self.config.max_include_depth,
            )));
        }

        let (resolved, text) = self
            .loader
            .load(&path, file.path)
            .map_err(|source| at(PreprocessErrorKind::IncludeFailed {
                path: path.clone(),
                source,
            }))?;
        let name = resolved.display().to_string();
        debug!("{}:{}: including {}", file.name, line, name);
        let included = SourceFile {
            name: &name,
            path: Some(&resolved),
            depth: file.depth + 1,
        };
        self.process_source(&included, &text, out)
    }
}
