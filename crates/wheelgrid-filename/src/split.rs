use memchr::memchr;

/// Splits a string on a single-byte delimiter, like [`str::split`], using `memchr`.
///
/// An empty haystack yields a single empty slice, and a trailing delimiter yields a trailing
/// empty slice.
pub(crate) struct MemchrSplitter<'a> {
    haystack: &'a str,
    delimiter: u8,
    offset: Option<usize>,
}

impl<'a> MemchrSplitter<'a> {
    pub(crate) fn split(haystack: &'a str, delimiter: u8) -> Self {
        debug_assert!(delimiter.is_ascii());
        MemchrSplitter {
            haystack,
            delimiter,
            offset: Some(0),
        }
    }
}

impl<'a> Iterator for MemchrSplitter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let offset = self.offset?;
        match memchr(self.delimiter, &self.haystack.as_bytes()[offset..]) {
            Some(index) => {
                self.offset = Some(offset + index + 1);
                Some(&self.haystack[offset..offset + index])
            }
            None => {
                self.offset = None;
                Some(&self.haystack[offset..])
            }
        }
    }
}
