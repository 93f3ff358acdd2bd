pub const BEHAVIORAL_TIPS: [&str; 5] = [
    "Be honest and confident",
    "Use STAR method for answers",
    "Maintain positive body language",
    "Research company culture",
    "Show enthusiasm for the role",
];

pub const TECHNICAL_TIPS: [&str; 5] = [
    "Brush up on core technical subjects",
    "Prepare for coding or problem-solving tasks",
    "Explain your reasoning clearly",
    "Show projects or hands-on experience",
    "Be clear about tools & technologies used",
];

pub const GENERAL_TIPS: [&str; 5] = [
    "Know about the company background",
    "Prepare for common HR questions",
    "Be on time for the interview",
    "Dress professionally",
    "Keep your resume updated and handy",
];

const HR_KEYWORDS: [&str; 2] = ["hr", "human resources"];
const TECHNICAL_KEYWORDS: [&str; 4] = ["technical", "developer", "engineer", "programmer"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipSet {
    Behavioral,
    Technical,
    General,
}

impl TipSet {
    pub fn for_role(role: &str) -> Self {
        let role = role.to_lowercase();
        if HR_KEYWORDS.iter().any(|k| role.contains(k)) {
            TipSet::Behavioral
        } else if TECHNICAL_KEYWORDS.iter().any(|k| role.contains(k)) {
            TipSet::Technical
        } else {
            TipSet::General
        }
    }

    pub fn tips(self) -> &'static [&'static str] {
        match self {
            TipSet::Behavioral => &BEHAVIORAL_TIPS,
            TipSet::Technical => &TECHNICAL_TIPS,
            TipSet::General => &GENERAL_TIPS,
        }
    }
}

pub fn tips_for_role(role: &str) -> Vec<String> {
    TipSet::for_role(role)
        .tips()
        .iter()
        .map(|t| t.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_tip_set_by_keyword() {
        assert_eq!(TipSet::for_role("HR"), TipSet::Behavioral);
        assert_eq!(TipSet::for_role("Human Resources Partner"), TipSet::Behavioral);
        assert_eq!(TipSet::for_role("technical"), TipSet::Technical);
        assert_eq!(TipSet::for_role("Backend Developer"), TipSet::Technical);
        assert_eq!(TipSet::for_role("Site Reliability Engineer"), TipSet::Technical);
        assert_eq!(TipSet::for_role("Sales"), TipSet::General);
        assert_eq!(TipSet::for_role(""), TipSet::General);
    }

    #[test]
    fn hr_match_wins_over_technical() {
        // substring match, same as the keyword order above
        assert_eq!(TipSet::for_role("HR technical recruiter"), TipSet::Behavioral);
    }

    #[test]
    fn returns_five_tips() {
        let tips = tips_for_role("programmer");
        assert_eq!(tips.len(), 5);
        assert_eq!(tips[0], "Brush up on core technical subjects");
    }
}
