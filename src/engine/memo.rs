/// Remembers the most recent input and the output computed from it.
#[derive(Debug, Clone)]
pub struct Memo<I, O> {
    last: Option<(I, O)>,
    hits: u64,
}

impl<I, O> Default for Memo<I, O> {
    fn default() -> Self {
        Self { last: None, hits: 0 }
    }
}

impl<I: PartialEq + Clone, O> Memo<I, O> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached output when `input` equals the previous input,
    /// otherwise compute, cache and return. Errors are not cached.
    pub fn get_or_try_compute<E>(
        &mut self,
        input: &I,
        compute: impl FnOnce(&I) -> Result<O, E>,
    ) -> Result<&O, E> {
        let entry = match self.last.take() {
            Some(entry) if entry.0 == *input => {
                self.hits += 1;
                entry
            }
            previous => match compute(input) {
                Ok(output) => (input.clone(), output),
                Err(err) => {
                    self.last = previous;
                    return Err(err);
                }
            },
        };
        Ok(&self.last.insert(entry).1)
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}
