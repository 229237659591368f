//! Built-in records served when no data source is reachable.

use crate::domain::model::{DownloadRecord, ExperienceRecord, Metrics, ProjectRecord, Skill};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn experience(
    title: &str,
    company: &str,
    location: &str,
    period: &str,
    description: &str,
    achievements: &[&str],
    technologies: &[&str],
) -> ExperienceRecord {
    ExperienceRecord {
        title: title.to_string(),
        company: company.to_string(),
        location: location.to_string(),
        period: period.to_string(),
        employment_type: "Full-time".to_string(),
        description: description.to_string(),
        achievements: strings(achievements),
        technologies: strings(technologies),
    }
}

pub fn experiences() -> Vec<ExperienceRecord> {
    vec![
        experience(
            "Senior Software Engineer",
            "TechCorp Solutions",
            "Jakarta, Indonesia",
            "2022 - Present",
            "Lead frontend development for enterprise web applications using React, Next.js, and TypeScript. Mentored junior developers and established coding standards.",
            &[
                "Improved application performance by 40%",
                "Led team of 5 developers",
                "Implemented CI/CD pipeline",
            ],
            &["React", "Next.js", "TypeScript", "Node.js", "PostgreSQL"],
        ),
        experience(
            "Frontend Developer",
            "Digital Startup Inc.",
            "Remote",
            "2020 - 2022",
            "Developed responsive web applications and mobile apps using modern JavaScript frameworks. Collaborated with designers to create pixel-perfect implementations.",
            &[
                "Built 10+ client projects",
                "Increased user engagement by 60%",
                "Reduced load times by 50%",
            ],
            &["Vue.js", "React", "Flutter", "Firebase", "Tailwind CSS"],
        ),
        experience(
            "Junior Web Developer",
            "Creative Agency",
            "Bandung, Indonesia",
            "2019 - 2020",
            "Started my professional journey building websites for local businesses. Gained experience in full-stack development and client communication.",
            &[
                "Completed 25+ websites",
                "100% client satisfaction",
                "Learned modern frameworks",
            ],
            &["HTML", "CSS", "JavaScript", "PHP", "WordPress"],
        ),
    ]
}

pub fn skills() -> Vec<Skill> {
    strings(&[
        "React.js",
        "Next.js",
        "Vue.js",
        "TypeScript",
        "Node.js",
        "Express.js",
        "PostgreSQL",
        "MongoDB",
        "Redis",
        "Docker",
        "AWS",
        "Vercel",
        "Figma",
        "Git",
        "Jest",
        "Tailwind CSS",
    ])
}

#[allow(clippy::too_many_arguments)]
fn project(
    title: &str,
    description: &str,
    category: &str,
    year: &str,
    tags: &[&str],
    status: &str,
    featured: bool,
    metrics: &[(&str, &str)],
) -> ProjectRecord {
    ProjectRecord {
        title: title.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        year: year.to_string(),
        tags: strings(tags),
        github: "#".to_string(),
        live: "#".to_string(),
        status: status.to_string(),
        featured,
        metrics: metrics.iter().copied().collect::<Metrics>(),
        image: String::new(),
    }
}

pub fn projects() -> Vec<ProjectRecord> {
    vec![
        project(
            "EcoTrack - Sustainability App",
            "A comprehensive sustainability tracking app that helps users monitor their carbon footprint, set eco-friendly goals, and connect with like-minded individuals.",
            "Mobile App",
            "2024",
            &["React Native", "Node.js", "MongoDB", "Socket.io", "Chart.js"],
            "Live",
            true,
            &[("users", "10K+"), ("rating", "4.8"), ("downloads", "50K+")],
        ),
        project(
            "TaskFlow - Project Management",
            "An intuitive project management platform with real-time collaboration, advanced analytics, and integrated time tracking for teams.",
            "Web App",
            "2023",
            &["Next.js", "TypeScript", "PostgreSQL", "Prisma", "Tailwind CSS"],
            "Live",
            true,
            &[("users", "5K+"), ("rating", "4.9"), ("teams", "200+")],
        ),
        project(
            "AI Content Generator",
            "A smart content generation tool powered by AI that helps marketers create engaging social media posts, blog articles, and ad copy.",
            "SaaS",
            "2024",
            &["React", "Python", "FastAPI", "OpenAI API", "Stripe"],
            "Beta",
            true,
            &[("users", "2K+"), ("content", "100K+"), ("accuracy", "95%")],
        ),
        project(
            "Recipe Finder App",
            "Discover recipes based on ingredients you have at home. Features meal planning, shopping lists, and nutritional information.",
            "Mobile App",
            "2023",
            &["Flutter", "Firebase", "Spoonacular API"],
            "Live",
            false,
            &[],
        ),
        project(
            "Crypto Portfolio Tracker",
            "Real-time cryptocurrency portfolio tracking with advanced analytics, price alerts, and news integration.",
            "Web App",
            "2022",
            &["Vue.js", "Chart.js", "CoinGecko API"],
            "Live",
            false,
            &[],
        ),
    ]
}

pub fn downloads() -> Vec<DownloadRecord> {
    vec![DownloadRecord {
        label: "Resume".to_string(),
        url: "https://drive.google.com/file/d/1ZFD1fcVhMDdzdCZS8hUBSEWbYwIeK075/view?usp=sharing"
            .to_string(),
        filename: "Resume.pdf".to_string(),
        version: "v1.0".to_string(),
        updated: "2024-09".to_string(),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_sizes() {
        assert_eq!(experiences().len(), 3);
        assert_eq!(skills().len(), 16);
        assert_eq!(projects().len(), 5);
        assert_eq!(downloads().len(), 1);
    }

    #[test]
    fn test_fallback_projects_featured_and_metrics() {
        let projects = projects();
        let featured: Vec<&str> = projects
            .iter()
            .filter(|p| p.featured)
            .map(|p| p.title.as_str())
            .collect();
        assert_eq!(
            featured,
            vec![
                "EcoTrack - Sustainability App",
                "TaskFlow - Project Management",
                "AI Content Generator"
            ]
        );
        assert!(projects[3].metrics.is_empty());
        assert_eq!(projects[2].metrics.get("accuracy"), Some("95%"));
    }

    #[test]
    fn test_fallback_download_resolves_direct_link() {
        assert_eq!(
            downloads()[0].download_url(),
            "https://drive.google.com/uc?export=download&id=1ZFD1fcVhMDdzdCZS8hUBSEWbYwIeK075"
        );
    }
}
