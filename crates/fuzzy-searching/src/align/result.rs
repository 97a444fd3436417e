//! Match/gap segmentation of a candidate

/// A run of candidate characters, either matched against the query or skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Match(Vec<char>),
    Gap(Vec<char>),
}

impl Segment {
    pub fn chars(&self) -> &[char] {
        match self {
            Segment::Match(chars) | Segment::Gap(chars) => chars,
        }
    }

    pub fn len(&self) -> usize {
        self.chars().len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars().is_empty()
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Segment::Match(_))
    }

    pub fn as_string(&self) -> String {
        self.chars().iter().collect()
    }

    /// Marker row for this run: `*` per matched character, space per gap
    pub fn as_gaps(&self) -> String {
        let marker = if self.is_match() { '*' } else { ' ' };
        std::iter::repeat(marker).take(self.len()).collect()
    }

    pub fn reversed(&self) -> Segment {
        let chars = self.chars().iter().rev().copied().collect();
        self.with_chars(chars)
    }

    fn with_chars(&self, chars: Vec<char>) -> Segment {
        match self {
            Segment::Match(_) => Segment::Match(chars),
            Segment::Gap(_) => Segment::Gap(chars),
        }
    }
}

/// Ordered segments covering a candidate.
///
/// Kept normalized: no empty segments and no two neighbours of the same kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FuzzyResult {
    segments: Vec<Segment>,
}

impl FuzzyResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw segments, merging neighbours and dropping empties
    pub fn from_segments(segments: impl IntoIterator<Item = Segment>) -> Self {
        let mut result = Self::new();
        for segment in segments {
            result.push(segment);
        }
        result
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Total number of characters covered
    pub fn len(&self) -> usize {
        self.segments.iter().map(Segment::len).sum()
    }

    /// Concatenated text of every segment
    pub fn as_string(&self) -> String {
        self.segments.iter().flat_map(|s| s.chars()).collect()
    }

    /// Append a segment, extending the last one when the kinds agree
    pub fn push(&mut self, segment: Segment) {
        if segment.is_empty() {
            return;
        }
        match self.segments.last_mut() {
            Some(Segment::Match(last)) if segment.is_match() => last.extend(segment.chars()),
            Some(Segment::Gap(last)) if !segment.is_match() => last.extend(segment.chars()),
            _ => self.segments.push(segment),
        }
    }

    /// Concatenate `other` after `self`. The boundary segments fuse when they
    /// are of the same kind.
    pub fn combine(mut self, other: FuzzyResult) -> FuzzyResult {
        for segment in other.segments {
            self.push(segment);
        }
        self
    }

    /// Overlay two segmentations of the same candidate.
    ///
    /// At each step the leading runs are compared: the longer of two matches
    /// wins, the shorter of two gaps wins, and a match beats a gap. The
    /// winning run is emitted and that many characters are consumed from
    /// both sides.
    pub fn merge(&self, other: &FuzzyResult) -> FuzzyResult {
        let mut out = FuzzyResult::new();
        let mut left = Cursor::new(&self.segments);
        let mut right = Cursor::new(&other.segments);

        loop {
            let (a, b) = match (left.head(), right.head()) {
                (Some(a), Some(b)) => (a, b),
                (Some(_), None) => {
                    left.drain_into(&mut out);
                    break;
                }
                (None, Some(_)) => {
                    right.drain_into(&mut out);
                    break;
                }
                (None, None) => break,
            };

            let take_left = match (&a, &b) {
                (Segment::Gap(g1), Segment::Gap(g2)) => g1.len() <= g2.len(),
                (Segment::Match(m1), Segment::Match(m2)) => m1.len() >= m2.len(),
                (Segment::Gap(_), Segment::Match(_)) => false,
                (Segment::Match(_), Segment::Gap(_)) => true,
            };
            let winner = if take_left { a } else { b };

            let taken = winner.len();
            out.push(winner);
            left.advance(taken);
            right.advance(taken);
        }

        out
    }

    /// Reverse the segment order and the characters of each segment
    pub fn reversed(&self) -> FuzzyResult {
        FuzzyResult {
            segments: self.segments.iter().rev().map(Segment::reversed).collect(),
        }
    }
}

/// Read position inside a segment list: current segment and offset into it
struct Cursor<'a> {
    segments: &'a [Segment],
    index: usize,
    offset: usize,
}

impl<'a> Cursor<'a> {
    fn new(segments: &'a [Segment]) -> Self {
        Self {
            segments,
            index: 0,
            offset: 0,
        }
    }

    /// Remainder of the current segment
    fn head(&self) -> Option<Segment> {
        let segment = self.segments.get(self.index)?;
        Some(segment.with_chars(segment.chars()[self.offset..].to_vec()))
    }

    /// Skip `n` characters, crossing segment boundaries as needed
    fn advance(&mut self, mut n: usize) {
        while n > 0 {
            let Some(segment) = self.segments.get(self.index) else {
                return;
            };
            let available = segment.len() - self.offset;
            if n < available {
                self.offset += n;
                return;
            }
            n -= available;
            self.index += 1;
            self.offset = 0;
        }
    }

    fn drain_into(&mut self, out: &mut FuzzyResult) {
        while let Some(head) = self.head() {
            out.push(head);
            self.index += 1;
            self.offset = 0;
        }
    }
}
