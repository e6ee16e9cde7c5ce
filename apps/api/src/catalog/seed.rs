//! Built-in starter catalog, served when no external source is configured.

use crate::models::posting::JobPosting;

/// (id, title, company, location, salary_range, required_skills)
const SEED_POSTINGS: &[(&str, &str, &str, &str, &str, &[&str])] = &[
    (
        "seed-1",
        "Frontend Developer",
        "Innovate Inc.",
        "Boston, MA",
        "$110,000 - $140,000",
        &["React", "TypeScript", "CSS", "Next.js", "GraphQL"],
    ),
    (
        "seed-2",
        "Full Stack Engineer",
        "Data Dynamics",
        "Remote",
        "$130,000 - $170,000",
        &["Node.js", "React", "TypeScript", "PostgreSQL", "Docker"],
    ),
    (
        "seed-3",
        "UX/UI Designer",
        "Creative Solutions",
        "New York, NY",
        "$95,000 - $125,000",
        &["Figma", "Adobe XD", "User Research", "Prototyping", "Design Systems"],
    ),
    (
        "seed-4",
        "Product Manager",
        "CloudCore",
        "Austin, TX",
        "$140,000 - $180,000",
        &["Agile", "Roadmap Planning", "User Stories", "Market Analysis", "JIRA"],
    ),
    (
        "seed-5",
        "DevOps Engineer",
        "SecureNet",
        "Remote",
        "$135,000 - $165,000",
        &["AWS", "Kubernetes", "Terraform", "CI/CD", "Python"],
    ),
    (
        "seed-6",
        "Data Scientist",
        "QuantumLeap AI",
        "San Francisco, CA",
        "$150,000 - $200,000",
        &["Python", "TensorFlow", "PyTorch", "SQL", "Machine Learning"],
    ),
];

pub fn seed_postings() -> Vec<JobPosting> {
    SEED_POSTINGS
        .iter()
        .map(|(id, title, company, location, salary, skills)| JobPosting {
            id: id.to_string(),
            title: title.to_string(),
            company: company.to_string(),
            location: location.to_string(),
            salary_range: salary.to_string(),
            required_skills: skills.iter().map(|s| s.to_string()).collect(),
        })
        .collect()
}
