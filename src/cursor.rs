/// Character cursor over a path expression.
///
/// Positions are character offsets, not byte offsets, so error positions line
/// up with what a user sees in the expression.
pub struct Cursor {
    input: Vec<char>,
    position: usize,
}

impl Cursor {
    pub fn new(input: &str) -> Self {
        Cursor {
            input: input.chars().collect(),
            position: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.input.len()
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    pub fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    pub fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    pub fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    pub fn char_at(&self, position: usize) -> Option<char> {
        self.input.get(position).copied()
    }

    pub fn advance(&mut self) {
        self.position += 1;
    }

    /// Only the space character counts as whitespace in a path.
    pub fn skip_whitespace(&mut self) {
        while self.current_char() == Some(' ') {
            self.advance();
        }
    }

    /// Text between two positions.
    pub fn slice(&self, start: usize, end: usize) -> String {
        self.input[start..end].iter().collect()
    }

    /// Consumes `word` if the input continues with it, leaving the cursor
    /// untouched otherwise.
    pub fn match_str(&mut self, word: &str) -> bool {
        let mut position = self.position;
        for ch in word.chars() {
            if self.input.get(position) != Some(&ch) {
                return false;
            }
            position += 1;
        }

        self.position = position;
        true
    }
}
