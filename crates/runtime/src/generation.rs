/// Monotonic change stamp.
///
/// Inputs that can trigger a recompute carry a generation; a derived value
/// records the generations it was built from and is stale as soon as any of
/// them moves. Comparing stamps replaces comparing (possibly large) values.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(pub u64);

impl Generation {
    pub const INITIAL: Generation = Generation(0);

    pub fn next(self) -> Self {
        Generation(self.0.wrapping_add(1))
    }
}

/// A value together with the generation of its last replacement.
#[derive(Debug, Clone, PartialEq)]
pub struct Versioned<T> {
    value: T,
    generation: Generation,
}

impl<T> Versioned<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            generation: Generation::INITIAL,
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Stores `value` and advances the generation, even if the value is equal.
    pub fn replace(&mut self, value: T) -> Generation {
        self.value = value;
        self.generation = self.generation.next();
        self.generation
    }
}

impl<T: Default> Default for Versioned<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::{Generation, Versioned};

    #[test]
    fn next_advances_by_one() {
        assert_eq!(Generation::INITIAL.next(), Generation(1));
        assert_eq!(Generation(u64::MAX).next(), Generation(0));
    }

    #[test]
    fn replace_bumps_generation_even_for_equal_values() {
        let mut v = Versioned::new(3);
        assert_eq!(v.generation(), Generation(0));
        assert_eq!(v.replace(3), Generation(1));
        assert_eq!(v.replace(4), Generation(2));
        assert_eq!(*v.get(), 4);
    }
}
