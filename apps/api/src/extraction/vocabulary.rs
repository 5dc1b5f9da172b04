//! Controlled skill vocabulary and skill categories.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

const DEFAULT_SKILLS: &[&str] = &[
    "Python", "Java", "SQL", "Machine Learning", "Data Analysis", "Project Management",
    "Communication", "Leadership", "AWS", "Azure", "GCP", "Docker", "Kubernetes",
    "JavaScript", "React", "Angular", "Node.js", "Django", "Flask", "TensorFlow",
    "PyTorch", "Scikit-learn", "Numpy", "Pandas", "Git", "Agile", "Scrum",
    "HTML", "CSS", "C++", "C#", "Ruby", "Go", "Swift", "Kotlin", "PHP", "R",
    "Excel", "PowerPoint", "Word", "Tableau", "Power BI", "Spark", "Hadoop",
    "Linux", "Windows Server", "Networking", "Cybersecurity", "DevOps", "CI/CD",
    "REST API", "Microservices", "Unit Testing", "Integration Testing", "APIs",
    "Problem Solving", "Critical Thinking", "Teamwork", "Adaptability",
    "Database Management", "Object-Oriented Programming", "Functional Programming",
    "Web Development", "Mobile Development", "Cloud Computing", "Big Data",
    "Natural Language Processing", "Computer Vision", "Deep Learning", "Reinforcement Learning",
    "Software Development Life Cycle (SDLC)", "API Design", "Data Structures", "Algorithms",
    "PostgreSQL", "MongoDB", "Tailwind", "API Development", "Parrot OS", "Cursor", "WindSurf",
    "Langflow", "SaaS", "Backend Development", "Frontend Technologies",
    "Content Management System (CMS)", "Data Integration", "JWT authentication",
    "Role-based access", "Analytics Dashboard",
];

const DEFAULT_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "programming_languages",
        &["Python", "Java", "JavaScript", "C++", "C#", "Ruby", "Go", "Swift", "Kotlin", "PHP", "R"],
    ),
    (
        "web_frameworks",
        &["React", "Angular", "Node.js", "Django", "Flask", "Express.js"],
    ),
    ("databases", &["SQL", "MongoDB", "PostgreSQL", "MySQL", "Redis"]),
    ("cloud_platforms", &["AWS", "Azure", "GCP", "Google Cloud Platform"]),
    ("devops_tools", &["Docker", "Kubernetes", "Git", "CI/CD", "Jenkins"]),
    (
        "data_science",
        &["Machine Learning", "Data Analysis", "TensorFlow", "PyTorch", "Scikit-learn", "Numpy", "Pandas"],
    ),
    (
        "soft_skills",
        &["Communication", "Leadership", "Teamwork", "Problem Solving", "Critical Thinking", "Adaptability"],
    ),
];

/// On-disk shape of a vocabulary override.
#[derive(Debug, Deserialize)]
struct VocabularyFile {
    skills: Vec<String>,
    #[serde(default)]
    categories: Option<BTreeMap<String, Vec<String>>>,
}

/// Known skill names with their canonical casing, plus optional categories.
///
/// Without categories the ranker falls back to a count-based diversity score.
#[derive(Debug, Clone)]
pub struct SkillVocabulary {
    skills: Vec<String>,
    by_lower: HashMap<String, usize>,
    categories: Option<BTreeMap<String, Vec<String>>>,
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        let categories = DEFAULT_CATEGORIES
            .iter()
            .map(|(name, skills)| {
                (
                    name.to_string(),
                    skills.iter().map(|s| s.to_string()).collect(),
                )
            })
            .collect();
        Self::new(
            DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect(),
            Some(categories),
        )
    }
}

impl SkillVocabulary {
    /// Builds a vocabulary. Blank and case-insensitive duplicate names are dropped.
    pub fn new(skills: Vec<String>, categories: Option<BTreeMap<String, Vec<String>>>) -> Self {
        let mut kept = Vec::with_capacity(skills.len());
        let mut by_lower = HashMap::with_capacity(skills.len());
        for skill in skills {
            let skill = skill.trim().to_string();
            if skill.is_empty() {
                continue;
            }
            let key = skill.to_lowercase();
            if by_lower.contains_key(&key) {
                continue;
            }
            by_lower.insert(key, kept.len());
            kept.push(skill);
        }
        Self {
            skills: kept,
            by_lower,
            categories,
        }
    }

    /// Reads a JSON vocabulary file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read skill vocabulary {}", path.display()))?;
        let file: VocabularyFile = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid skill vocabulary JSON in {}", path.display()))?;
        let vocabulary = Self::new(file.skills, file.categories);
        if vocabulary.is_empty() {
            anyhow::bail!("Skill vocabulary {} lists no skills", path.display());
        }
        Ok(vocabulary)
    }

    /// The file at `path` when given, otherwise the built-in vocabulary.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_json_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn categories(&self) -> Option<&BTreeMap<String, Vec<String>>> {
        self.categories.as_ref()
    }

    /// Canonical casing for a skill name, if it is in the vocabulary.
    pub fn canonical(&self, name: &str) -> Option<&str> {
        self.by_lower
            .get(&name.trim().to_lowercase())
            .map(|&i| self.skills[i].as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.canonical(name).is_some()
    }
}
