/// Strokes and level position for the current play session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub stroke_count: u32,
    pub level_index: usize,
    pub level_count: usize,
}

impl Session {
    pub fn new(level_count: usize) -> Self {
        Self {
            stroke_count: 0,
            level_index: 0,
            level_count,
        }
    }

    pub fn record_stroke(&mut self) -> u32 {
        self.stroke_count += 1;
        self.stroke_count
    }

    /// Reset strokes and step to the next level, looping after the last.
    /// Returns the index to load.
    pub fn finish_level(&mut self) -> usize {
        self.stroke_count = 0;
        self.level_index += 1;
        if self.level_index >= self.level_count {
            self.level_index = 0;
        }
        self.level_index
    }

    /// Jump to `index` with a fresh stroke count.
    pub fn start_level(&mut self, index: usize) {
        self.level_index = index;
        self.stroke_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finishing_advances_and_resets_strokes() {
        let mut s = Session::new(9);
        s.record_stroke();
        s.record_stroke();
        assert_eq!(s.finish_level(), 1);
        assert_eq!(s.stroke_count, 0);
    }

    #[test]
    fn finishing_last_level_wraps() {
        let mut s = Session::new(9);
        s.start_level(8);
        s.record_stroke();
        assert_eq!(s.finish_level(), 0);
        assert_eq!(s.level_index, 0);
        assert_eq!(s.stroke_count, 0);
    }

    #[test]
    fn single_level_session_loops_on_itself() {
        let mut s = Session::new(1);
        assert_eq!(s.finish_level(), 0);
        assert_eq!(s.finish_level(), 0);
    }
}
