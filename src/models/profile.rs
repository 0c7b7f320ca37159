//! Owner profile shown in the hero, about and footer sections.

/// A social or contact link shown below the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocialLink {
    /// Short label (e.g., "GitHub")
    pub label: &'static str,
    /// Target URL (`https://` or `mailto:`)
    pub url: &'static str,
}

/// Static profile content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Profile {
    /// Name shown in the title bar
    pub short_name: &'static str,
    /// Hero greeting
    pub greeting: &'static str,
    /// Hero tagline
    pub tagline: &'static str,
    /// About section body
    pub about: &'static str,
    /// Name used in the footer copyright line
    pub footer_name: &'static str,
    /// Footer sign-off
    pub footer_note: &'static str,
    /// Social links
    pub links: &'static [SocialLink],
}

impl Profile {
    /// Footer line for the given year.
    #[must_use]
    pub fn footer_line(&self, year: i32) -> String {
        format!("© {year} {} · {}", self.footer_name, self.footer_note)
    }
}

/// The portfolio owner.
pub const PROFILE: Profile = Profile {
    short_name: "Abinash",
    greeting: "Hi, I'm Abinash Dash 👋",
    tagline: "Senior Backend Developer | Java | Spring Boot | System Design",
    about: "Passionate backend engineer with 7+ years building scalable systems in Java. \
            I specialize in distributed architecture, clean code, and solving real-world \
            engineering challenges.",
    footer_name: "Abinash Mittal",
    footer_note: "Crafted with passion and code 💻✨",
    links: &[
        SocialLink {
            label: "GitHub",
            url: "https://github.com/adashexplorer",
        },
        SocialLink {
            label: "LinkedIn",
            url: "https://www.linkedin.com/in/dashabinash/",
        },
        SocialLink {
            label: "Email",
            url: "mailto:abinashdashvssut@gmail.com",
        },
    ],
};
