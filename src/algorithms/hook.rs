/// A trait for reacting to an edit script from the "old" sequence to
/// the "new" sequence.
///
/// The engine invokes the hook in left-to-right order.  Every call is
/// directly adjacent to the previous one in both index spaces, so the calls
/// partition both sequences without gaps.
pub trait AlignHook: Sized {
    /// The error produced from the hook methods.
    type Error;

    /// Called when `len` tokens starting at `old_index` (in the old sequence)
    /// and `new_index` (in the new sequence) match.
    fn equal(&mut self, old_index: usize, new_index: usize, len: usize) -> Result<(), Self::Error> {
        let _ = old_index;
        let _ = new_index;
        let _ = len;
        Ok(())
    }

    /// Called when a section of length `old_len`, starting at `old_index`,
    /// needs to be deleted from the old sequence.  `new_index` is the
    /// position in the new sequence where the deletion happens.
    fn delete(
        &mut self,
        old_index: usize,
        old_len: usize,
        new_index: usize,
    ) -> Result<(), Self::Error> {
        let _ = old_index;
        let _ = old_len;
        let _ = new_index;
        Ok(())
    }

    /// Called when a section of the new sequence, of length `new_len`
    /// and starting at `new_index`, needs to be inserted at position `old_index`.
    fn insert(
        &mut self,
        old_index: usize,
        new_index: usize,
        new_len: usize,
    ) -> Result<(), Self::Error> {
        let _ = old_index;
        let _ = new_index;
        let _ = new_len;
        Ok(())
    }

    /// Called when a section of the old sequence, starting at index
    /// `old_index` and of length `old_len`, needs to be replaced with a
    /// section of length `new_len`, starting at `new_index`, of the new
    /// sequence.
    ///
    /// The default implementations invokes `delete` and `insert`.
    fn substitute(
        &mut self,
        old_index: usize,
        old_len: usize,
        new_index: usize,
        new_len: usize,
    ) -> Result<(), Self::Error> {
        self.delete(old_index, old_len, new_index)?;
        self.insert(old_index + old_len, new_index, new_len)
    }

    /// Called when `len` tokens starting at `old_index` are a reordering of
    /// the `len` tokens starting at `new_index`.
    ///
    /// The default implementation treats this as a substitution.
    fn transpose(
        &mut self,
        old_index: usize,
        new_index: usize,
        len: usize,
    ) -> Result<(), Self::Error> {
        self.substitute(old_index, len, new_index, len)
    }

    /// Always called at the end of the algorithm.
    fn finish(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<'a, D: AlignHook + 'a> AlignHook for &'a mut D {
    type Error = D::Error;

    fn equal(&mut self, old_index: usize, new_index: usize, len: usize) -> Result<(), Self::Error> {
        (*self).equal(old_index, new_index, len)
    }

    fn delete(
        &mut self,
        old_index: usize,
        old_len: usize,
        new_index: usize,
    ) -> Result<(), Self::Error> {
        (*self).delete(old_index, old_len, new_index)
    }

    fn insert(
        &mut self,
        old_index: usize,
        new_index: usize,
        new_len: usize,
    ) -> Result<(), Self::Error> {
        (*self).insert(old_index, new_index, new_len)
    }

    fn substitute(
        &mut self,
        old_index: usize,
        old_len: usize,
        new_index: usize,
        new_len: usize,
    ) -> Result<(), Self::Error> {
        (*self).substitute(old_index, old_len, new_index, new_len)
    }

    fn transpose(
        &mut self,
        old_index: usize,
        new_index: usize,
        len: usize,
    ) -> Result<(), Self::Error> {
        (*self).transpose(old_index, new_index, len)
    }

    fn finish(&mut self) -> Result<(), Self::Error> {
        (*self).finish()
    }
}
