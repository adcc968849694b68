#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub(crate) const COUNT: usize = 12;

    pub(crate) fn all() -> &'static [Month; 12] {
        &[
            Self::January,
            Self::February,
            Self::March,
            Self::April,
            Self::May,
            Self::June,
            Self::July,
            Self::August,
            Self::September,
            Self::October,
            Self::November,
            Self::December,
        ]
    }

    /// Zero-based index, January = 0.
    pub(crate) fn from_index(index: u8) -> Option<Self> {
        Self::all().get(index as usize).copied()
    }

    pub(crate) fn index(self) -> u8 {
        self as u8
    }

    /// The month `offset` months after this one, wrapping past December.
    pub(crate) fn advance(self, offset: u32) -> Self {
        let idx = (self.index() as u32 + offset) % Self::COUNT as u32;
        Self::all()[idx as usize]
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::January => "January",
            Self::February => "February",
            Self::March => "March",
            Self::April => "April",
            Self::May => "May",
            Self::June => "June",
            Self::July => "July",
            Self::August => "August",
            Self::September => "September",
            Self::October => "October",
            Self::November => "November",
            Self::December => "December",
        }
    }

    pub(crate) fn short(self) -> &'static str {
        &self.as_str()[..3]
    }

    /// Parse a 1-based month number ("1".."12") or an English month name.
    /// Names match case-insensitively on any prefix of at least three letters.
    pub(crate) fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(n) = s.parse::<u8>() {
            return n.checked_sub(1).and_then(Self::from_index);
        }
        let lower = s.to_lowercase();
        if lower.len() < 3 {
            return None;
        }
        Self::all()
            .iter()
            .copied()
            .find(|m| m.as_str().to_lowercase().starts_with(&lower))
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
