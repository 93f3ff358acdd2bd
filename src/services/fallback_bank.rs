use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use crate::error::{Error, Result};
use crate::models::question::QuizQuestion;
use crate::services::fallback_data::{
    self, AuthoredSet, QuestionTemplate, RenderedTemplate, HR_ROLE, TECHNICAL_ROLE,
};

pub const MIN_QUESTIONS_PER_KEY: usize = 10;

/// Role substitution order when the requested role has no entry.
const ROLE_SUBSTITUTES: [&str; 2] = [TECHNICAL_ROLE, HR_ROLE];

#[derive(Debug, Clone)]
struct CompanyEntry {
    name: String,
    roles: BTreeMap<String, Vec<QuizQuestion>>,
}

/// Offline question bank keyed by company and role.
///
/// Built once and never mutated; every key holds at least
/// [`MIN_QUESTIONS_PER_KEY`] questions.
#[derive(Debug, Clone)]
pub struct FallbackBank {
    companies: BTreeMap<String, CompanyEntry>,
    default_company: String,
}

/// Resolved bank entry, naming the keys that were actually used.
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'a> {
    pub company: &'a str,
    pub role: &'a str,
    pub questions: &'a [QuizQuestion],
}

static SHARED: OnceLock<Arc<FallbackBank>> = OnceLock::new();

impl FallbackBank {
    /// Builds the bank from the bundled seed data.
    pub fn new(default_company: &str) -> Result<Self> {
        Self::from_seed(
            fallback_data::AUTHORED_SETS,
            &fallback_data::TEMPLATED_COMPANIES,
            fallback_data::PADDING_TEMPLATES,
            default_company,
        )
    }

    /// Process-wide bank with the given default, built on first use.
    pub fn shared(default_company: &str) -> Result<Arc<Self>> {
        if let Some(bank) = SHARED.get() {
            return Ok(bank.clone());
        }
        let bank = Arc::new(Self::new(default_company)?);
        Ok(SHARED.get_or_init(|| bank).clone())
    }

    pub fn from_seed(
        authored: &[AuthoredSet],
        templated_companies: &[&str],
        padding: &[QuestionTemplate],
        default_company: &str,
    ) -> Result<Self> {
        if padding.is_empty() {
            return Err(Error::Config("Fallback padding templates are empty".to_string()));
        }

        let mut companies: BTreeMap<String, CompanyEntry> = BTreeMap::new();

        for set in authored {
            let entry = company_entry(&mut companies, set.company);
            let questions = entry.roles.entry(set.role.to_string()).or_default();
            for template in set.questions {
                let n = questions.len() + 1;
                questions.push(to_question(
                    format!("{}-{}", set.id_prefix, n),
                    template.render(set.company, set.role),
                ));
            }
        }

        for company in templated_companies {
            let slug = company.to_lowercase();
            let entry = company_entry(&mut companies, company);
            for role in fallback_data::SUPPORTED_ROLES {
                if entry.roles.contains_key(role) {
                    continue;
                }
                let (tag, seed) = fallback_data::seed_for_role(role);
                let questions = seed
                    .iter()
                    .enumerate()
                    .map(|(i, template)| {
                        to_question(
                            format!("{}-{}-{}", slug, tag, i + 1),
                            template.render(company, role),
                        )
                    })
                    .collect();
                entry.roles.insert(role.to_string(), questions);
            }
        }

        for entry in companies.values_mut() {
            let slug = entry.name.to_lowercase();
            for (role, questions) in entry.roles.iter_mut() {
                pad(questions, &entry.name, &slug, role, padding);
            }
        }

        let bank = Self {
            companies,
            default_company: default_company.to_string(),
        };
        bank.check_invariants()?;
        Ok(bank)
    }

    fn check_invariants(&self) -> Result<()> {
        if !self.companies.contains_key(&key(&self.default_company)) {
            return Err(Error::Config(format!(
                "Default fallback company '{}' has no questions",
                self.default_company
            )));
        }
        for entry in self.companies.values() {
            if entry.roles.is_empty() {
                return Err(Error::Config(format!(
                    "Fallback company '{}' has no roles",
                    entry.name
                )));
            }
            for (role, questions) in &entry.roles {
                if questions.len() < MIN_QUESTIONS_PER_KEY {
                    return Err(Error::Config(format!(
                        "Fallback bank {}/{} holds {} questions",
                        entry.name,
                        role,
                        questions.len()
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn default_company(&self) -> &str {
        &self.default_company
    }

    /// Exact lookup, case-insensitive on both keys.
    pub fn get(&self, company: &str, role: &str) -> Option<&[QuizQuestion]> {
        self.companies
            .get(&key(company))
            .and_then(|c| c.roles.get(&key(role)))
            .map(Vec::as_slice)
    }

    /// Lookup with substitution: unknown companies map to the default company,
    /// unknown roles map to `technical` and then `hr`.
    pub fn resolve(&self, company: &str, role: &str) -> Resolved<'_> {
        let entry = self
            .companies
            .get(&key(company))
            .or_else(|| self.companies.get(&key(&self.default_company)))
            .expect("default company presence is checked at construction");

        let requested = key(role);
        let (role_name, questions) = entry
            .roles
            .get_key_value(&requested)
            .or_else(|| {
                ROLE_SUBSTITUTES
                    .iter()
                    .find_map(|r| entry.roles.get_key_value(*r))
            })
            .or_else(|| entry.roles.iter().next())
            .expect("every company holds at least one role");

        Resolved {
            company: &entry.name,
            role: role_name,
            questions,
        }
    }

    /// Questions of the company's roles other than `role`, in role order.
    pub fn other_roles<'a>(
        &'a self,
        company: &str,
        role: &'a str,
    ) -> impl Iterator<Item = &'a [QuizQuestion]> + 'a {
        self.companies
            .get(&key(company))
            .into_iter()
            .flat_map(move |c| {
                c.roles
                    .iter()
                    .filter(move |(r, _)| r.as_str() != role)
                    .map(|(_, qs)| qs.as_slice())
            })
    }

    pub fn companies(&self) -> impl Iterator<Item = &str> {
        self.companies.values().map(|c| c.name.as_str())
    }

    pub fn roles(&self, company: &str) -> Vec<&str> {
        self.companies
            .get(&key(company))
            .map(|c| c.roles.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn question_count(&self, company: &str) -> usize {
        self.companies
            .get(&key(company))
            .map(|c| c.roles.values().map(Vec::len).sum())
            .unwrap_or(0)
    }
}

fn key(s: &str) -> String {
    s.trim().to_lowercase()
}

fn company_entry<'a>(
    companies: &'a mut BTreeMap<String, CompanyEntry>,
    name: &str,
) -> &'a mut CompanyEntry {
    companies.entry(key(name)).or_insert_with(|| CompanyEntry {
        name: name.to_string(),
        roles: BTreeMap::new(),
    })
}

fn to_question(id: String, rendered: RenderedTemplate) -> QuizQuestion {
    let [option_a, option_b, option_c, option_d] = rendered.options;
    QuizQuestion {
        id,
        question: rendered.question,
        option_a,
        option_b,
        option_c,
        option_d,
        correct_answer: rendered.correct_answer,
        difficulty: rendered.difficulty,
    }
}

/// Appends padding templates cyclically until the minimum is reached.
fn pad(
    questions: &mut Vec<QuizQuestion>,
    company: &str,
    slug: &str,
    role: &str,
    templates: &[QuestionTemplate],
) {
    let mut counter = 0usize;
    while questions.len() < MIN_QUESTIONS_PER_KEY {
        let template = &templates[counter % templates.len()];
        let id = format!("{}-{}-{}", slug, role, questions.len() + 1);
        questions.push(to_question(id, template.render(company, role)));
        counter += 1;
    }
}
