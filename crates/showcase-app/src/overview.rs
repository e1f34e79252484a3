//! Written evaluation shown alongside each library's examples.

use crate::library::LibraryProfile;
use std::fmt;

/// What a library is rated on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    Usability,
    Performance,
    Features,
    Integration,
}

impl Criterion {
    pub fn all() -> &'static [Criterion] {
        &[Criterion::Usability, Criterion::Performance, Criterion::Features, Criterion::Integration]
    }

    pub fn title(self) -> &'static str {
        match self {
            Criterion::Usability => "Usability",
            Criterion::Performance => "Performance",
            Criterion::Features => "Features",
            Criterion::Integration => "Integration",
        }
    }
}

/// A star rating out of [`Rating::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rating(u8);

impl Rating {
    pub const MAX: u8 = 5;

    /// Ratings above the maximum are capped.
    pub const fn new(stars: u8) -> Self {
        Self(if stars > Self::MAX { Self::MAX } else { stars })
    }

    pub fn stars(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..Self::MAX {
            f.write_str(if i < self.0 { "★" } else { "☆" })?;
        }
        Ok(())
    }
}

/// One row of the evaluation summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assessment {
    pub criterion: Criterion,
    pub rating: Rating,
    pub note: &'static str,
}

const fn assess(criterion: Criterion, stars: u8, note: &'static str) -> Assessment {
    Assessment {
        criterion,
        rating: Rating::new(stars),
        note,
    }
}

/// Everything a library page says about the library besides its examples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibraryOverview {
    pub summary: &'static str,
    pub features: &'static [&'static str],
    pub evaluation: [Assessment; 4],
    pub use_cases: &'static [&'static str],
}

impl LibraryOverview {
    pub fn assessment(&self, criterion: Criterion) -> Option<&Assessment> {
        self.evaluation.iter().find(|a| a.criterion == criterion)
    }

    /// Mean rating across all criteria.
    pub fn average(&self) -> f64 {
        let total: u32 = self.evaluation.iter().map(|a| u32::from(a.rating.stars())).sum();
        f64::from(total) / self.evaluation.len() as f64
    }
}

const KONVA: LibraryOverview = LibraryOverview {
    summary: "Konva is a 2D canvas library that enables high-performance drawing and animation. \
              react-konva provides React components for easy integration.",
    features: &[
        "React integration via react-konva",
        "High performance with canvas rendering",
        "Event handling (click, drag, hover)",
        "Animations and transformations",
    ],
    evaluation: [
        assess(
            Criterion::Usability,
            4,
            "React-friendly API with intuitive component structure. Good documentation.",
        ),
        assess(
            Criterion::Performance,
            5,
            "Excellent performance with canvas rendering. Handles many objects smoothly.",
        ),
        assess(
            Criterion::Features,
            4,
            "Comprehensive shape library, events, animations, and transformations built-in.",
        ),
        assess(
            Criterion::Integration,
            5,
            "Seamless React integration. TypeScript support available. Easy to use with Next.js.",
        ),
    ],
    use_cases: &[
        "Interactive diagrams and flowcharts",
        "Data visualizations and charts",
        "Image editors and drawing applications",
        "Game development",
        "Interactive infographics",
    ],
};

const FABRIC: LibraryOverview = LibraryOverview {
    summary: "Fabric.js is a powerful and simple JavaScript canvas library that provides an interactive \
              object model on top of canvas element. It's great for creating complex graphics with ease.",
    features: &[
        "Rich object model with inheritance",
        "Built-in support for transformations",
        "Event handling and animations",
        "SVG-to-canvas and canvas-to-SVG conversion",
    ],
    evaluation: [
        assess(
            Criterion::Usability,
            5,
            "Excellent API design with intuitive object model. Extensive documentation and examples.",
        ),
        assess(
            Criterion::Performance,
            4,
            "Good performance for most use cases. May slow down with hundreds of objects.",
        ),
        assess(
            Criterion::Features,
            5,
            "Rich feature set including SVG support, filters, gradients, and complex transformations.",
        ),
        assess(
            Criterion::Integration,
            4,
            "Works well with React through refs. TypeScript support available but needs manual setup.",
        ),
    ],
    use_cases: &[
        "Image editing and manipulation tools",
        "Design and prototyping applications",
        "Interactive presentations and infographics",
        "Diagram and flowchart editors",
        "Canvas-based games with complex graphics",
    ],
};

const PAPER: LibraryOverview = LibraryOverview {
    summary: "Paper.js is a vector graphics scripting framework that runs on top of the HTML5 Canvas. \
              It offers a clean Scene Graph / Document Object Model and a lot of powerful functionality.",
    features: &[
        "Vector-based graphics with precision",
        "Scene graph with hierarchical structure",
        "Powerful path manipulation",
        "Mathematical operations on geometric shapes",
    ],
    evaluation: [
        assess(
            Criterion::Usability,
            4,
            "Clean API with mathematical approach. Learning curve for vector graphics concepts.",
        ),
        assess(
            Criterion::Performance,
            5,
            "Excellent performance with vector operations. Efficient rendering and updating.",
        ),
        assess(
            Criterion::Features,
            5,
            "Comprehensive vector graphics tools, path operations, and geometric utilities.",
        ),
        assess(
            Criterion::Integration,
            3,
            "Works with React via canvas refs. No official React bindings. TypeScript support available.",
        ),
    ],
    use_cases: &[
        "Vector graphics editors and design tools",
        "Data visualization with precision graphics",
        "Generative art and creative coding",
        "Technical drawings and CAD applications",
        "Interactive animations and visualizations",
    ],
};

impl LibraryProfile {
    pub fn overview(self) -> &'static LibraryOverview {
        match self {
            LibraryProfile::Konva => &KONVA,
            LibraryProfile::Fabric => &FABRIC,
            LibraryProfile::Paper => &PAPER,
        }
    }
}

/// A library page's prose as text: overview, examples, evaluation and use cases.
pub fn library_report(profile: LibraryProfile) -> String {
    let overview = profile.overview();
    let mut report = format!("{}\n{}\n\nOverview\n  {}\n", profile.title(), profile.tagline(), overview.summary);
    for feature in overview.features {
        report.push_str(&format!("  + {feature}\n"));
    }

    report.push_str("\nInteractive Examples\n");
    for example in profile.examples() {
        report.push_str(&format!("  {}. {}: {}\n", example.number(), example.title(), example.description()));
    }

    report.push_str("\nEvaluation Summary\n");
    for assessment in &overview.evaluation {
        report.push_str(&format!(
            "  {:<12} {}  {}\n",
            assessment.criterion.title(),
            assessment.rating,
            assessment.note
        ));
    }
    report.push_str(&format!("  Average      {:.2}\n", overview.average()));

    report.push_str("\nUse Cases\n");
    for use_case in overview.use_cases {
        report.push_str(&format!("  - {use_case}\n"));
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_display() {
        assert_eq!(Rating::new(4).to_string(), "★★★★☆");
        assert_eq!(Rating::new(9).stars(), Rating::MAX);
        assert_eq!(Rating::new(0).to_string(), "☆☆☆☆☆");
    }

    #[test]
    fn test_every_criterion_is_rated_once() {
        for profile in LibraryProfile::all() {
            let overview = profile.overview();
            for criterion in Criterion::all() {
                let count = overview.evaluation.iter().filter(|a| a.criterion == *criterion).count();
                assert_eq!(count, 1, "{profile} {criterion:?}");
            }
            assert_eq!(overview.features.len(), 4);
            assert_eq!(overview.use_cases.len(), 5);
        }
    }

    #[test]
    fn test_ratings() {
        let paper = LibraryProfile::Paper.overview();
        assert_eq!(paper.assessment(Criterion::Integration).unwrap().rating.stars(), 3);
        assert!((paper.average() - 4.25).abs() < 1e-9);
        assert!((LibraryProfile::Konva.overview().average() - 4.5).abs() < 1e-9);
        assert!((LibraryProfile::Fabric.overview().average() - 4.5).abs() < 1e-9);
    }

    #[test]
    fn test_library_report() {
        let report = library_report(LibraryProfile::Fabric);
        assert!(report.starts_with("Fabric.js\nPowerful canvas library with interactive object model\n"));
        assert!(report.contains("  + SVG-to-canvas and canvas-to-SVG conversion\n"));
        assert!(report.contains("  7. Export Canvas (Multiple Sizes): "));
        assert!(report.contains("  Performance  ★★★★☆  Good performance"));
        assert!(report.contains("  Average      4.50\n"));
        assert!(report.ends_with("  - Canvas-based games with complex graphics\n"));
    }

    #[test]
    fn test_konva_report_lists_four_examples() {
        let report = library_report(LibraryProfile::Konva);
        assert!(report.contains("  4. Text Rendering"));
        assert!(!report.contains("  5. "));
    }
}
