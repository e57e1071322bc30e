//! Fixed copy for the landing page.
//!
//! The "24-Hour Access" card contradicts the 14 day expiry the upload widget
//! shows. Neither is checked against what the hosting service really does.

use serde::Serialize;

#[derive(Serialize, Clone, Copy, Debug)]
pub struct NavEntry {
    /// Anchor of the page section.
    pub id: &'static str,
    pub label: &'static str,
}

#[derive(Serialize, Clone, Copy, Debug)]
pub struct Feature {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Serialize, Clone, Copy, Debug)]
pub struct Review {
    pub name: &'static str,
    pub role: &'static str,
    pub image: &'static str,
    pub review: &'static str,
    /// 1 to 5.
    pub stars: u8,
}

impl Review {
    /// The rating as a row of stars, e.g. `★★★★☆`.
    pub fn star_row(&self) -> String {
        let filled = usize::from(self.stars.min(5));
        "★".repeat(filled) + &"☆".repeat(5 - filled)
    }
}

pub const SITE_NAME: &str = "FileShare";
pub const HERO_TITLE: &str = "Share Files Securely";
pub const HERO_TAGLINE: &str =
    "Upload and share files up to 2GB with anyone, anywhere. Fast, secure, and reliable.";
pub const INFO_TAGLINE: &str = "Simple, secure, and straightforward file sharing";
pub const REVIEWS_TITLE: &str = "What Our Users Say";

pub const NAV: [NavEntry; 3] = [
    NavEntry {
        id: "home",
        label: "Home",
    },
    NavEntry {
        id: "info",
        label: "Information",
    },
    NavEntry {
        id: "reviews",
        label: "Reviews",
    },
];

pub const FEATURES: [Feature; 3] = [
    Feature {
        icon: "shield",
        title: "Secure Sharing",
        description: "Files are encrypted and automatically deleted after download",
    },
    Feature {
        icon: "clock",
        title: "24-Hour Access",
        description: "Links remain active for 24 hours or until first download",
    },
    Feature {
        icon: "globe",
        title: "Global Access",
        description: "Share files with anyone, anywhere in the world",
    },
];

pub const REVIEWS: [Review; 3] = [
    Review {
        name: "Sarah Johnson",
        role: "Digital Marketing Manager",
        image: "https://images.unsplash.com/photo-1494790108377-be9c29b29330?ixlib=rb-1.2.1&auto=format&fit=crop&w=128&h=128&q=80",
        review: "FileShare has revolutionized how we share assets with our clients. Fast, secure, and reliable!",
        stars: 5,
    },
    Review {
        name: "Michael Chen",
        role: "Software Developer",
        image: "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?ixlib=rb-1.2.1&auto=format&fit=crop&w=128&h=128&q=80",
        review: "Perfect for sharing large files with my team. The interface is clean and intuitive.",
        stars: 5,
    },
    Review {
        name: "Emma Davis",
        role: "Graphic Designer",
        image: "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?ixlib=rb-1.2.1&auto=format&fit=crop&w=128&h=128&q=80",
        review: "As a designer, I need to share large files daily. FileShare makes it effortless.",
        stars: 4,
    },
];
