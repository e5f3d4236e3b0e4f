use std::fmt;

/// Subject grades that enter the aggregate tables, in report column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
    X,
    /// Published as `*R`.
    StarR,
}

impl Grade {
    pub const COUNT: usize = 7;

    pub const ALL: [Grade; Grade::COUNT] = [
        Grade::A,
        Grade::B,
        Grade::C,
        Grade::D,
        Grade::F,
        Grade::X,
        Grade::StarR,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
            Grade::X => "X",
            Grade::StarR => "*R",
        }
    }

    /// Exact match against the published labels; anything else is not a valid grade.
    pub fn from_label(label: &str) -> Option<Grade> {
        Grade::ALL.into_iter().find(|g| g.label() == label)
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result annotations published in place of a score or division.
pub const STAR_CODES: &[(&str, &str)] = &[
    ("*S", "Results suspended due to anomalies or irregularities"),
    ("*E", "Results withheld, pending proof of payment"),
    ("*I", "Incomplete results due to missing Continuous Assessment scores"),
    ("*W", "Results withheld/nullified due to dishonesty or irregularities"),
    ("*T", "Results transferred to previous year due to illness"),
    ("ABS", "Candidate missed the exam"),
    ("FLD", "Candidate failed the exam"),
    ("X", "Candidate did not appear for the registered subject"),
];

pub const UNKNOWN_CODE: &str = "Unknown code";

pub fn star_code_meaning(code: &str) -> &'static str {
    STAR_CODES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, meaning)| *meaning)
        .unwrap_or(UNKNOWN_CODE)
}
