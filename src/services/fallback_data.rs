//! Seed content for the fallback bank.
//!
//! Hand-authored sets exist for a few companies; the remaining supported
//! companies get a two-question seed per role built from templates, and every
//! key is later padded from [`PADDING_TEMPLATES`].

use crate::models::question::AnswerOption;

/// Question text plus its options, before company and role are substituted.
///
/// Templates may contain `{company}` and `{role}` placeholders.
#[derive(Debug, Clone, Copy)]
pub struct QuestionTemplate {
    pub question: &'static str,
    pub options: [&'static str; 4],
    pub correct_answer: AnswerOption,
    pub difficulty: &'static str,
}

impl QuestionTemplate {
    pub fn render(&self, company: &str, role: &str) -> RenderedTemplate {
        let fill = |s: &str| s.replace("{company}", company).replace("{role}", role);
        RenderedTemplate {
            question: fill(self.question),
            options: self.options.map(fill),
            correct_answer: self.correct_answer,
            difficulty: self.difficulty.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderedTemplate {
    pub question: String,
    pub options: [String; 4],
    pub correct_answer: AnswerOption,
    pub difficulty: String,
}

/// A hand-authored role set. `id_prefix` is combined with a 1-based counter.
pub struct AuthoredSet {
    pub company: &'static str,
    pub role: &'static str,
    pub id_prefix: &'static str,
    pub questions: &'static [QuestionTemplate],
}

pub const TECHNICAL_ROLE: &str = "technical";
pub const HR_ROLE: &str = "hr";
pub const SUPPORTED_ROLES: [&str; 2] = [TECHNICAL_ROLE, HR_ROLE];

/// Companies that only receive templated seed questions.
pub const TEMPLATED_COMPANIES: [&str; 11] = [
    "Amazon",
    "Microsoft",
    "Meta",
    "Apple",
    "Netflix",
    "Uber",
    "Airbnb",
    "Infosys",
    "TCS",
    "Wipro",
    "Accenture",
];

const fn t(
    question: &'static str,
    options: [&'static str; 4],
    correct_answer: AnswerOption,
    difficulty: &'static str,
) -> QuestionTemplate {
    QuestionTemplate {
        question,
        options,
        correct_answer,
        difficulty,
    }
}

use AnswerOption::{B, C};

pub const GOOGLE_TECHNICAL: &[QuestionTemplate] = &[
    t(
        "What is the time complexity of searching in a balanced binary search tree?",
        ["O(n)", "O(log n)", "O(n log n)", "O(1)"],
        B,
        "medium",
    ),
    t(
        "Which algorithm would you use to find the shortest path in a weighted graph?",
        ["Breadth-First Search", "Depth-First Search", "Dijkstra's Algorithm", "Linear Search"],
        C,
        "medium",
    ),
    t(
        "What is Google's primary programming language for Android development?",
        ["Java", "Python", "Kotlin", "C++"],
        C,
        "easy",
    ),
    t(
        "In MapReduce, what is the purpose of the 'reduce' function?",
        [
            "To split data into chunks",
            "To aggregate intermediate results",
            "To sort the input data",
            "To validate data integrity",
        ],
        B,
        "hard",
    ),
    t(
        "What does 'Big O' notation describe?",
        ["Memory usage", "Code readability", "Algorithm efficiency", "Number of bugs"],
        C,
        "easy",
    ),
    t(
        "Which data structure is most suitable for implementing a cache with LRU eviction?",
        ["Array", "Stack", "Hash Map + Doubly Linked List", "Binary Tree"],
        C,
        "hard",
    ),
    t(
        "What is the main advantage of using microservices architecture?",
        [
            "Easier debugging",
            "Better scalability and maintainability",
            "Faster development",
            "Lower costs",
        ],
        B,
        "medium",
    ),
    t(
        "In distributed systems, what is 'eventual consistency'?",
        [
            "Data is always consistent",
            "Data becomes consistent over time",
            "Data is never consistent",
            "Consistency is not important",
        ],
        B,
        "hard",
    ),
    t(
        "What is the purpose of unit testing?",
        [
            "Test the entire application",
            "Test individual components in isolation",
            "Test user interface only",
            "Test database connections",
        ],
        B,
        "easy",
    ),
    t(
        "Which design pattern is commonly used for creating objects without specifying their exact class?",
        ["Singleton", "Observer", "Factory", "Decorator"],
        C,
        "medium",
    ),
];

pub const GOOGLE_HR: &[QuestionTemplate] = &[
    t(
        "What motivates you to work at Google?",
        [
            "High salary only",
            "Innovation and impact on billions of users",
            "Easy work environment",
            "Job security only",
        ],
        B,
        "easy",
    ),
    t(
        "How would you handle a disagreement with a team member?",
        [
            "Ignore the disagreement",
            "Escalate to manager immediately",
            "Discuss openly and find common ground",
            "Work around the person",
        ],
        C,
        "medium",
    ),
    t(
        "Describe a time when you failed and what you learned from it.",
        [
            "I never fail",
            "Share specific example and lessons learned",
            "Blame others for the failure",
            "Avoid answering the question",
        ],
        B,
        "medium",
    ),
    t(
        "What is Google's mission statement?",
        [
            "To make money",
            "To organize the world's information and make it universally accessible",
            "To be the biggest tech company",
            "To create the best products",
        ],
        B,
        "easy",
    ),
    t(
        "How do you prioritize tasks when everything seems urgent?",
        [
            "Work on everything at once",
            "Ask manager to decide",
            "Evaluate impact and deadlines systematically",
            "Work on easiest tasks first",
        ],
        C,
        "medium",
    ),
    t(
        "What would you do if you noticed a colleague struggling with their work?",
        [
            "Ignore it, not my problem",
            "Report them to manager",
            "Offer help and support",
            "Do their work for them",
        ],
        C,
        "easy",
    ),
    t(
        "How do you stay updated with industry trends?",
        [
            "I don't need to",
            "Read blogs, attend conferences, continuous learning",
            "Only listen to colleagues",
            "Wait for company training",
        ],
        B,
        "easy",
    ),
    t(
        "Describe your ideal work environment.",
        [
            "Working alone always",
            "Collaborative, innovative, and growth-oriented",
            "No challenges or pressure",
            "Minimum work required",
        ],
        B,
        "easy",
    ),
    t(
        "How would you contribute to Google's culture of innovation?",
        [
            "Follow existing processes only",
            "Bring fresh ideas and encourage experimentation",
            "Avoid taking risks",
            "Focus only on assigned tasks",
        ],
        B,
        "medium",
    ),
    t(
        "What are your long-term career goals?",
        [
            "Get promoted quickly",
            "Continuous learning and making meaningful impact",
            "Work less over time",
            "Change companies frequently",
        ],
        B,
        "easy",
    ),
];

pub const AUTHORED_SETS: &[AuthoredSet] = &[
    AuthoredSet {
        company: "Google",
        role: TECHNICAL_ROLE,
        id_prefix: "google-tech",
        questions: GOOGLE_TECHNICAL,
    },
    AuthoredSet {
        company: "Google",
        role: HR_ROLE,
        id_prefix: "google-hr",
        questions: GOOGLE_HR,
    },
];

pub const TECHNICAL_SEED: &[QuestionTemplate] = &[
    t(
        "What interests you most about the technical challenges at {company}?",
        [
            "The salary and benefits",
            "Working with cutting-edge technology and solving complex problems",
            "The office location",
            "Working hours flexibility",
        ],
        B,
        "easy",
    ),
    t(
        "How would you approach a complex technical problem at {company}?",
        [
            "Ask someone else to solve it",
            "Break it down, research, and collaborate with team",
            "Use only familiar solutions",
            "Avoid the problem",
        ],
        B,
        "medium",
    ),
];

pub const HR_SEED: &[QuestionTemplate] = &[
    t(
        "What attracts you to work at {company}?",
        [
            "High salary package",
            "Company culture, values, and growth opportunities",
            "Easy work environment",
            "Job security only",
        ],
        B,
        "easy",
    ),
    t(
        "How do you handle tight deadlines at {company}?",
        [
            "Panic and work overtime",
            "Prioritize tasks, communicate with team, and deliver quality work",
            "Compromise on quality",
            "Blame others for delays",
        ],
        B,
        "medium",
    ),
];

pub fn seed_for_role(role: &str) -> (&'static str, &'static [QuestionTemplate]) {
    if role == HR_ROLE {
        ("hr", HR_SEED)
    } else {
        ("tech", TECHNICAL_SEED)
    }
}

pub const PADDING_TEMPLATES: &[QuestionTemplate] = &[
    t(
        "Describe your experience with team collaboration in a {role} role.",
        [
            "I prefer working alone",
            "I actively collaborate and communicate effectively",
            "I only collaborate when required",
            "I let others handle collaboration",
        ],
        B,
        "easy",
    ),
    t(
        "How do you stay updated with the latest {role} trends and technologies?",
        [
            "I don't need to stay updated",
            "Continuous learning through courses, blogs, and practice",
            "Only through company training",
            "Learning from colleagues only",
        ],
        B,
        "easy",
    ),
    t(
        "What is your approach to handling criticism and feedback in a {role} position?",
        [
            "Ignore negative feedback",
            "Accept constructively and use it for improvement",
            "Get defensive",
            "Blame others",
        ],
        B,
        "medium",
    ),
    t(
        "How would you contribute to {company}'s success in a {role} role?",
        [
            "Just complete assigned tasks",
            "Bring innovative ideas and drive results",
            "Follow existing processes only",
            "Focus on personal goals only",
        ],
        B,
        "medium",
    ),
    t(
        "What motivates you in a {role} position?",
        [
            "Only financial rewards",
            "Learning, growth, and making meaningful impact",
            "Easy tasks",
            "Recognition only",
        ],
        B,
        "easy",
    ),
    t(
        "How do you handle stress and pressure in a {role} environment?",
        [
            "Avoid stressful situations",
            "Use time management and stay focused on solutions",
            "Panic and lose focus",
            "Blame external factors",
        ],
        B,
        "medium",
    ),
    t(
        "Describe your problem-solving approach in a {role} context.",
        [
            "Give up quickly",
            "Analyze systematically and seek creative solutions",
            "Use only familiar methods",
            "Ask others to solve problems",
        ],
        B,
        "medium",
    ),
    t(
        "What skills do you want to develop further in your {role} career?",
        [
            "No additional skills needed",
            "Both technical and soft skills for career growth",
            "Only technical skills",
            "Only communication skills",
        ],
        B,
        "easy",
    ),
];
