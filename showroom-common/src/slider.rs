/// Position of an image slider with wrap-around navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slider {
    len: usize,
    current: usize,
}

impl Slider {
    /// `None` when there is nothing to slide.
    pub fn new(len: usize) -> Option<Slider> {
        if len == 0 {
            None
        } else {
            Some(Slider { len, current: 0 })
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_active(&self, index: usize) -> bool {
        index == self.current
    }

    /// Moves to `index`, ignoring positions past the last slide.
    pub fn go(&mut self, index: usize) -> usize {
        if index < self.len {
            self.current = index;
        }
        self.current
    }

    pub fn next(&mut self) -> usize {
        self.current = (self.current + 1) % self.len;
        self.current
    }

    pub fn prev(&mut self) -> usize {
        self.current = (self.current + self.len - 1) % self.len;
        self.current
    }
}
