use serde::{Deserialize, Serialize};

use crate::models::skills::SkillSet;

/// One "N years" style requirement found in a job description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearsRequirement {
    pub min_years: Option<u32>,
    pub max_years: Option<u32>,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceRequirements {
    #[serde(default)]
    pub years_required: Vec<YearsRequirement>,
    /// Vocabulary skills the posting ties to experience, expertise or background.
    #[serde(default)]
    pub technology_experience: SkillSet,
}

impl ExperienceRequirements {
    /// Smallest stated minimum, if any requirement states one.
    pub fn minimum_years(&self) -> Option<u32> {
        self.years_required.iter().filter_map(|r| r.min_years).min()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationRequirements {
    #[serde(default)]
    pub degree_requirements: Vec<String>,
    #[serde(default)]
    pub fields_of_study: Vec<String>,
}

/// Informational only; not used in scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleRequirements {
    #[serde(default)]
    pub job_titles: Vec<String>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
}

/// Informational only; not used in scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    #[serde(default)]
    pub company_names: Vec<String>,
    #[serde(default)]
    pub locations: Vec<String>,
}

/// Structured requirements extracted from one job description.
///
/// `required_skills` and `preferred_skills` never share a skill.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobRequirements {
    pub required_skills: SkillSet,
    pub preferred_skills: SkillSet,
    #[serde(default)]
    pub experience_requirements: ExperienceRequirements,
    #[serde(default)]
    pub education_requirements: EducationRequirements,
    #[serde(default)]
    pub role_requirements: RoleRequirements,
    #[serde(default)]
    pub company_info: CompanyInfo,
    #[serde(default)]
    pub all_extracted_skills: SkillSet,
}

impl JobRequirements {
    /// Required followed by preferred skills, in display order.
    pub fn all_skills(&self) -> Vec<String> {
        self.required_skills
            .iter()
            .chain(self.preferred_skills.iter())
            .map(String::from)
            .collect()
    }
}

/// Condensed view of a job posting embedded in ranking output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobSummary {
    pub required_skills_count: usize,
    pub preferred_skills_count: usize,
    pub top_required_skills: Vec<String>,
    pub experience_requirements: ExperienceRequirements,
    pub education_requirements: EducationRequirements,
    pub role_info: RoleRequirements,
}

impl From<&JobRequirements> for JobSummary {
    fn from(job: &JobRequirements) -> Self {
        Self {
            required_skills_count: job.required_skills.len(),
            preferred_skills_count: job.preferred_skills.len(),
            top_required_skills: job.required_skills.iter().take(5).map(String::from).collect(),
            experience_requirements: job.experience_requirements.clone(),
            education_requirements: job.education_requirements.clone(),
            role_info: job.role_requirements.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_years_ignores_open_records() {
        let reqs = ExperienceRequirements {
            years_required: vec![
                YearsRequirement { min_years: None, max_years: Some(8), kind: "general".into() },
                YearsRequirement { min_years: Some(5), max_years: None, kind: "general".into() },
                YearsRequirement { min_years: Some(3), max_years: Some(5), kind: "general".into() },
            ],
            technology_experience: SkillSet::new(),
        };
        assert_eq!(reqs.minimum_years(), Some(3));
        assert_eq!(ExperienceRequirements::default().minimum_years(), None);
    }

    #[test]
    fn test_years_requirement_serializes_type_field() {
        let req = YearsRequirement { min_years: Some(2), max_years: None, kind: "general".into() };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["type"], "general");
    }

    #[test]
    fn test_summary_takes_five_required_skills() {
        let job = JobRequirements {
            required_skills: ["a1", "b2", "c3", "d4", "e5", "f6"].into_iter().collect(),
            ..JobRequirements::default()
        };
        let summary = JobSummary::from(&job);
        assert_eq!(summary.required_skills_count, 6);
        assert_eq!(summary.top_required_skills.len(), 5);
    }
}
