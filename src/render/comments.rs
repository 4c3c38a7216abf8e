// src/render/comments.rs

//! Language-aware comment stripping for the full-strip render mode.
//!
//! Each recognized type tag maps to one comment syntax family; unmapped tags
//! pass through untouched. Strippers are conservative: they protect string
//! literals where the language has them and only remove what is
//! unambiguously a comment.

use log::debug;

/// Comment syntax families handled by [`strip_comments`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommentStyle {
    /// `//` line and `/* */` block comments, string/char literal aware.
    CLike,
    /// `<!-- -->` plus C-like, for markup that hosts embedded scripts.
    MarkupAndCLike,
    /// `<!-- -->` only, for pure markup and data documents.
    MarkupOnly,
    /// Whole lines whose first non-whitespace character is `#`.
    Hash,
    /// `--` to end of line, outside single-quoted strings.
    Sql,
    /// No comment syntax.
    Plain,
}

fn style_for(file_type: &str) -> CommentStyle {
    match file_type {
        "java" | "js" | "mjs" | "cjs" | "ts" | "jsx" | "tsx" | "css" | "scss" | "sass"
        | "less" | "json" | "packagejson" | "tsconfig" | "gradle" | "c" | "cpp" | "h" | "hpp"
        | "cs" | "php" | "kt" | "swift" | "go" | "rs" => CommentStyle::CLike,
        "html" | "htm" | "vue" | "svelte" => CommentStyle::MarkupAndCLike,
        // Pure XML/markdown has no C-style comments; running the C-like pass
        // over it would eat `//` inside unquoted text such as URLs.
        "xml" | "pom" | "svg" | "md" | "classpath" | "project" => CommentStyle::MarkupOnly,
        "sh" | "bash" | "py" | "rb" | "yaml" | "yml" | "properties" | "toml" | "ini"
        | "dockerfile" | "gitignore" => CommentStyle::Hash,
        "sql" => CommentStyle::Sql,
        _ => CommentStyle::Plain,
    }
}

/// Strips the comments appropriate for `file_type` from `content`.
///
/// # Examples
///
/// ```
/// use srcunify::render::strip_comments;
///
/// let java = "int x = 1; // counter\n/* block */\nint y = 2;";
/// assert_eq!(strip_comments(java, "java"), "int x = 1;\n\nint y = 2;");
///
/// let html = "<p>hi</p> <!-- greeting -->";
/// assert_eq!(strip_comments(html, "html"), "<p>hi</p>");
/// ```
pub fn strip_comments(content: &str, file_type: &str) -> String {
    let stripped = match style_for(file_type) {
        CommentStyle::CLike => remove_c_comments(content),
        CommentStyle::MarkupAndCLike => remove_c_comments(&remove_markup_comments(content)),
        CommentStyle::MarkupOnly => remove_markup_comments(content),
        CommentStyle::Hash => remove_hash_comments(content),
        CommentStyle::Sql => remove_sql_comments(content),
        CommentStyle::Plain => return content.to_string(),
    };
    debug!(
        "Stripped comments from a '{}' file: {} -> {} bytes",
        file_type,
        content.len(),
        stripped.len()
    );
    stripped
}

/// Removes lines containing only whitespace.
///
/// Applied after [`strip_comments`] so that lines a comment occupied alone
/// do not survive as blank gaps.
///
/// # Examples
///
/// ```
/// use srcunify::render::remove_blank_lines;
///
/// let text = "line 1\n\n  \t  \nline 4";
/// assert_eq!(remove_blank_lines(text), "line 1\nline 4");
/// ```
pub fn remove_blank_lines(content: &str) -> String {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<&str>>()
        .join("\n")
}

/// Removes `//` line and `/* */` block comments using a state machine.
///
/// Comment markers inside string and character literals are left alone, as
/// are escaped quotes inside those literals. The result has trailing
/// whitespace trimmed from every line and leading/trailing newlines removed,
/// so lines that held only a comment do not leave ragged whitespace behind.
fn remove_c_comments(content: &str) -> String {
    enum State {
        Code,
        SlashPending,
        LineComment,
        BlockComment,
        BlockStarPending,
        Str,
        StrEscape,
        Ch,
        ChEscape,
    }

    let mut result = String::with_capacity(content.len());
    let mut state = State::Code;

    for c in content.chars() {
        match state {
            State::Code => match c {
                '/' => state = State::SlashPending,
                '"' => {
                    result.push(c);
                    state = State::Str;
                }
                '\'' => {
                    result.push(c);
                    state = State::Ch;
                }
                _ => result.push(c),
            },
            State::SlashPending => match c {
                '/' => state = State::LineComment,
                '*' => state = State::BlockComment,
                _ => {
                    // The held-back '/' was plain division or a path char.
                    result.push('/');
                    result.push(c);
                    state = match c {
                        '"' => State::Str,
                        '\'' => State::Ch,
                        _ => State::Code,
                    };
                }
            },
            State::LineComment => {
                if c == '\n' {
                    result.push(c);
                    state = State::Code;
                }
            }
            State::BlockComment => {
                if c == '*' {
                    state = State::BlockStarPending;
                }
            }
            State::BlockStarPending => match c {
                '/' => state = State::Code,
                '*' => {}
                _ => state = State::BlockComment,
            },
            State::Str => {
                result.push(c);
                match c {
                    '"' => state = State::Code,
                    '\\' => state = State::StrEscape,
                    _ => {}
                }
            }
            State::StrEscape => {
                result.push(c);
                state = State::Str;
            }
            State::Ch => {
                result.push(c);
                match c {
                    '\'' => state = State::Code,
                    '\\' => state = State::ChEscape,
                    _ => {}
                }
            }
            State::ChEscape => {
                result.push(c);
                state = State::Ch;
            }
        }
    }

    // Input ending in a lone '/' is code, not a comment opener.
    if matches!(state, State::SlashPending) {
        result.push('/');
    }
    // Input ending mid-comment simply loses the unterminated comment text.

    scrub(result)
}

/// Removes `<!-- -->` comments, including ones spanning several lines.
///
/// An unterminated `<!--` swallows the rest of the content, mirroring how
/// browsers treat a runaway comment.
fn remove_markup_comments(content: &str) -> String {
    let mut result = String::with_capacity(content.len());
    let mut rest = content;
    while let Some(start) = rest.find("<!--") {
        result.push_str(&rest[..start]);
        match rest[start + 4..].find("-->") {
            Some(end) => rest = &rest[start + 4 + end + 3..],
            None => {
                rest = "";
                break;
            }
        }
    }
    result.push_str(rest);
    scrub(result)
}

/// Drops whole lines whose first non-whitespace character is `#`.
///
/// Inline `#` is left alone: in shell and YAML it may sit inside a string,
/// a color literal, or an anchor, and telling those apart is not worth it.
fn remove_hash_comments(content: &str) -> String {
    let kept = content
        .lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .collect::<Vec<&str>>()
        .join("\n");
    scrub(kept)
}

/// Truncates each line at the first `--` occurring outside a single-quoted
/// string. The doubled-quote escape (`''`) toggles state twice and so stays
/// inside the string, as standard SQL requires.
fn remove_sql_comments(content: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    for line in content.lines() {
        let mut in_string = false;
        let mut cut = line.len();
        let mut chars = line.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            match c {
                '\'' => in_string = !in_string,
                '-' if !in_string => {
                    if matches!(chars.peek(), Some((_, '-'))) {
                        cut = i;
                        break;
                    }
                }
                _ => {}
            }
        }
        kept.push(&line[..cut]);
    }
    scrub(kept.join("\n"))
}

/// Shared cleanup: trim trailing whitespace per line, then strip leading and
/// trailing newlines while preserving first-line indentation.
fn scrub(result: String) -> String {
    result
        .lines()
        .map(str::trim_end)
        .collect::<Vec<&str>>()
        .join("\n")
        .trim_matches(|c: char| c == '\r' || c == '\n')
        .to_string()
}
