//! Hall of fame: past competition podiums.
//!
//! Results are curated by the organisers and ship with the binary; nothing
//! here touches the network.

use chrono::NaiveDate;

/// One ranked finisher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub player_name: &'static str,
    pub team_name: Option<&'static str>,
    pub rank: u8,
    pub score: u32,
}

/// Podium position for ranks 1-3
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Placement {
    pub fn medal(&self) -> Option<Medal> {
        match self.rank {
            1 => Some(Medal::Gold),
            2 => Some(Medal::Silver),
            3 => Some(Medal::Bronze),
            _ => None,
        }
    }

    /// "9,850"
    pub fn formatted_score(&self) -> String {
        let digits = self.score.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(c);
        }
        out
    }
}

/// Finishers of one competition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventWinners {
    pub id: &'static str,
    pub title: &'static str,
    /// `YYYY-MM-DD`
    pub date: &'static str,
    pub winners: &'static [Placement],
}

impl EventWinners {
    fn ranked(&self) -> Vec<&Placement> {
        let mut ranked: Vec<&Placement> = self.winners.iter().collect();
        ranked.sort_by_key(|p| p.rank);
        ranked
    }

    /// Top three by rank, best first
    pub fn podium(&self) -> Vec<&Placement> {
        self.ranked().into_iter().take(3).collect()
    }

    /// Everyone below the podium, by rank
    pub fn honourable_mentions(&self) -> Vec<&Placement> {
        self.ranked().into_iter().skip(3).collect()
    }

    /// "Aug 15, 2024", or the raw text if it is not a date
    pub fn formatted_date(&self) -> String {
        NaiveDate::parse_from_str(self.date, "%Y-%m-%d")
            .map(|d| d.format("%b %d, %Y").to_string())
            .unwrap_or_else(|_| self.date.to_string())
    }
}

const HALL_OF_FAME: &[EventWinners] = &[
    EventWinners {
        id: "evt_quantum",
        title: "Quantum Break CTF 2024",
        date: "2024-08-15",
        winners: &[
            Placement { player_name: "Cipher", team_name: Some("The Phantoms"), rank: 1, score: 9850 },
            Placement { player_name: "Glitch", team_name: None, rank: 2, score: 9120 },
            Placement { player_name: "Nyx", team_name: Some("Data Daemons"), rank: 3, score: 8750 },
        ],
    },
    EventWinners {
        id: "evt_sentinel",
        title: "Project Sentinel Finals",
        date: "2024-05-20",
        winners: &[
            Placement { player_name: "Vector", team_name: None, rank: 1, score: 8500 },
            Placement { player_name: "Proxy", team_name: Some("Root Cause"), rank: 2, score: 8100 },
        ],
    },
];

/// Every recorded competition, most recent first.
pub fn hall_of_fame() -> &'static [EventWinners] {
    HALL_OF_FAME
}
