//! Canonical route taxonomy.
//!
//! Every route identifier belongs to one [`RouteKind`] family, and both
//! display colors and labels are derived from that single classification so
//! the two can never drift apart. Classification precedence matters: the
//! multi-character prefixes `Bx` and `SIM` are checked before the
//! single-letter families `B`/`S`, and a bare `M`/`B`/`Q` is the subway
//! line, not a bus family.

/// Fallback color when nothing in the taxonomy matches.
pub const DEFAULT_COLOR: &str = "#000000";

/// Exact colors for subway lines and the Staten Island Railway.
const SUBWAY_LINE_COLORS: &[(&str, &str)] = &[
    ("1", "#EE352E"),
    ("2", "#EE352E"),
    ("3", "#EE352E"),
    ("4", "#00933C"),
    ("5", "#00933C"),
    ("6", "#00933C"),
    ("7", "#B933AD"),
    ("A", "#0039A6"),
    ("C", "#0039A6"),
    ("E", "#0039A6"),
    ("B", "#FF6319"),
    ("D", "#FF6319"),
    ("F", "#FF6319"),
    ("M", "#FF6319"),
    ("G", "#6CBE45"),
    ("J", "#996633"),
    ("Z", "#996633"),
    ("L", "#A7A9AC"),
    ("N", "#FCCC0A"),
    ("Q", "#FCCC0A"),
    ("R", "#FCCC0A"),
    ("W", "#FCCC0A"),
    ("S", "#808183"),
    ("SIR", "#0039A6"),
];

/// The route family a given identifier belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteKind {
    Subway,
    Railway,
    BusManhattan,
    BusBrooklyn,
    BusBronx,
    BusQueens,
    BusExpress,
    BusStatenIslandExpress,
}

impl RouteKind {
    /// Classify a route identifier into its family.
    ///
    /// Precedence is load-bearing: `Bx12` must classify as a Bronx bus
    /// before the `B` prefix can claim it for Brooklyn, and `SIM1` as a
    /// Staten Island express bus before `S`. A bare family letter (`M`,
    /// `B`, `Q`) is the subway line of the same name.
    pub fn classify(route: &str) -> Self {
        if route == "SIR" {
            Self::Railway
        } else if route.starts_with("Bx") {
            Self::BusBronx
        } else if route.starts_with("SIM") {
            Self::BusStatenIslandExpress
        } else if route.starts_with('M') && route.len() > 1 {
            Self::BusManhattan
        } else if route.starts_with('B') && route.len() > 1 {
            Self::BusBrooklyn
        } else if route.starts_with('Q') && route.len() > 1 {
            Self::BusQueens
        } else if route.starts_with('X') {
            Self::BusExpress
        } else {
            Self::Subway
        }
    }

    /// Display color for the whole family. Subway lines use per-line
    /// colors instead, see [`color`].
    pub fn family_color(&self) -> &'static str {
        match self {
            Self::Subway => DEFAULT_COLOR,
            Self::Railway => "#0039A6",
            Self::BusManhattan => "#4D92FB",
            Self::BusBrooklyn => "#F2C75C",
            Self::BusBronx => "#00AF87",
            Self::BusQueens => "#9467BD",
            Self::BusExpress => "#E60000",
            Self::BusStatenIslandExpress => "#FF9900",
        }
    }

    /// Whether vehicles of this family are buses (drawn as rectangles on
    /// the map rather than circles).
    pub fn is_bus(&self) -> bool {
        !matches!(self, Self::Subway | Self::Railway)
    }
}

/// Look up the exact per-line color for a subway line identifier.
fn subway_line_color(route: &str) -> Option<&'static str> {
    SUBWAY_LINE_COLORS
        .iter()
        .find(|(id, _)| *id == route)
        .map(|(_, color)| *color)
}

/// Resolve the display color for any route identifier.
///
/// This is a total function: exact subway-line match first, then the
/// family color, then a first-character fallback against the subway
/// table, then black. No identifier is ever unresolvable.
pub fn color(route: &str) -> &'static str {
    if route.is_empty() {
        return DEFAULT_COLOR;
    }
    if let Some(color) = subway_line_color(route) {
        return color;
    }
    match RouteKind::classify(route) {
        RouteKind::Subway => {
            let first = &route[..route.chars().next().map_or(0, char::len_utf8)];
            subway_line_color(first).unwrap_or(DEFAULT_COLOR)
        }
        kind => kind.family_color(),
    }
}

/// Human label for a route, e.g. `Line 4`, `Bus M15`, `Express Bus X1`.
pub fn label(route: &str) -> String {
    match RouteKind::classify(route) {
        RouteKind::Railway => "Staten Island Railway".to_string(),
        RouteKind::BusManhattan
        | RouteKind::BusBrooklyn
        | RouteKind::BusBronx
        | RouteKind::BusQueens => format!("Bus {route}"),
        RouteKind::BusExpress => format!("Express Bus {route}"),
        RouteKind::BusStatenIslandExpress => format!("Staten Island Express {route}"),
        RouteKind::Subway => format!("Line {route}"),
    }
}

/// A selectable group of lines on the vehicles page.
#[derive(Debug, Clone, Copy)]
pub struct LineGroup {
    /// Stable identifier used in query parameters.
    pub id: &'static str,
    /// Human name shown in the filter dropdown.
    pub name: &'static str,
    /// Member routes; empty for the bus pseudo-groups, which are resolved
    /// by family instead.
    pub routes: &'static [&'static str],
}

impl LineGroup {
    /// The `route_type` query value the upstream API expects for this
    /// group, if the group is served by a server-side filter.
    pub fn route_type_param(&self) -> Option<&'static str> {
        match self.id {
            "BUS" => Some("bus"),
            "EXPRESS" => Some("xbus"),
            "SIMEXPRESS" => Some("simbus"),
            _ => None,
        }
    }

    /// Whether a route belongs to this group.
    pub fn contains(&self, route: &str) -> bool {
        if !self.routes.is_empty() {
            return self.routes.contains(&route);
        }
        let kind = RouteKind::classify(route);
        match self.id {
            "BUS" => matches!(
                kind,
                RouteKind::BusManhattan
                    | RouteKind::BusBrooklyn
                    | RouteKind::BusBronx
                    | RouteKind::BusQueens
            ),
            "EXPRESS" => kind == RouteKind::BusExpress,
            "SIMEXPRESS" => kind == RouteKind::BusStatenIslandExpress,
            _ => false,
        }
    }
}

/// Line groups offered by the vehicles page filter.
pub const LINE_GROUPS: &[LineGroup] = &[
    LineGroup {
        id: "IRT",
        name: "IRT Lines (1,2,3,4,5,6,7)",
        routes: &["1", "2", "3", "4", "5", "6", "7"],
    },
    LineGroup {
        id: "IND",
        name: "IND Lines (A,C,E,B,D,F,M)",
        routes: &["A", "C", "E", "B", "D", "F", "M"],
    },
    LineGroup {
        id: "BMT",
        name: "BMT Lines (L,N,Q,R,W,J,Z)",
        routes: &["L", "N", "Q", "R", "W", "J", "Z"],
    },
    LineGroup {
        id: "S",
        name: "Shuttle Lines (S)",
        routes: &["S"],
    },
    LineGroup {
        id: "SIR",
        name: "Staten Island Railway",
        routes: &["SIR"],
    },
    LineGroup {
        id: "BUS",
        name: "Bus Routes",
        routes: &[],
    },
    LineGroup {
        id: "EXPRESS",
        name: "Express Bus Routes",
        routes: &[],
    },
    LineGroup {
        id: "SIMEXPRESS",
        name: "Staten Island Express Buses",
        routes: &[],
    },
];

/// Find a line group by its identifier.
pub fn line_group(id: &str) -> Option<&'static LineGroup> {
    LINE_GROUPS.iter().find(|g| g.id == id)
}

/// Subway and railway routes offered by the alert page route filter,
/// ahead of the per-borough bus lists.
pub const SUBWAY_ROUTES: &[&str] = &[
    "1", "2", "3", "4", "5", "6", "7", "A", "C", "E", "B", "D", "F", "M", "G",
    "J", "Z", "L", "N", "Q", "R", "W", "S", "SIR",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_subway_colors() {
        assert_eq!(color("4"), "#00933C");
        assert_eq!(color("A"), "#0039A6");
        assert_eq!(color("SIR"), "#0039A6");
    }

    #[test]
    fn test_bronx_prefix_beats_brooklyn() {
        // Bx must be checked before the single-letter B family.
        assert_eq!(RouteKind::classify("Bx12"), RouteKind::BusBronx);
        assert_eq!(color("Bx12"), "#00AF87");
        assert_ne!(color("Bx12"), RouteKind::BusBrooklyn.family_color());
    }

    #[test]
    fn test_sim_prefix_beats_shuttle_and_express() {
        assert_eq!(RouteKind::classify("SIM1"), RouteKind::BusStatenIslandExpress);
        assert_eq!(color("SIM1"), "#FF9900");
    }

    #[test]
    fn test_bare_letter_is_subway() {
        assert_eq!(RouteKind::classify("M"), RouteKind::Subway);
        assert_eq!(color("M"), "#FF6319");
        assert_eq!(RouteKind::classify("M15"), RouteKind::BusManhattan);
        assert_eq!(color("M15"), "#4D92FB");
    }

    #[test]
    fn test_borough_bus_families() {
        assert_eq!(RouteKind::classify("B41"), RouteKind::BusBrooklyn);
        assert_eq!(color("B41"), "#F2C75C");
        assert_eq!(RouteKind::classify("Q44"), RouteKind::BusQueens);
        assert_eq!(color("Q44"), "#9467BD");
        assert_eq!(RouteKind::classify("X17"), RouteKind::BusExpress);
        assert_eq!(color("X17"), "#E60000");
    }

    #[test]
    fn test_first_char_fallback() {
        // GS is not in the table; falls back to the G line color.
        assert_eq!(color("GS"), "#6CBE45");
    }

    #[test]
    fn test_color_is_total() {
        assert_eq!(color(""), DEFAULT_COLOR);
        assert_eq!(color("??"), DEFAULT_COLOR);
        assert_eq!(color("zz9"), DEFAULT_COLOR);
    }

    #[test]
    fn test_labels() {
        assert_eq!(label("4"), "Line 4");
        assert_eq!(label("SIR"), "Staten Island Railway");
        assert_eq!(label("M15"), "Bus M15");
        assert_eq!(label("X1"), "Express Bus X1");
        assert_eq!(label("SIM22"), "Staten Island Express SIM22");
    }

    #[test]
    fn test_line_group_membership() {
        let irt = line_group("IRT").unwrap();
        assert!(irt.contains("4"));
        assert!(!irt.contains("A"));

        let bus = line_group("BUS").unwrap();
        assert!(bus.contains("M15"));
        assert!(bus.contains("Bx12"));
        assert!(!bus.contains("X1"));
        assert!(!bus.contains("M"));

        let express = line_group("EXPRESS").unwrap();
        assert!(express.contains("X1"));
        assert!(!express.contains("SIM1"));

        let sim = line_group("SIMEXPRESS").unwrap();
        assert!(sim.contains("SIM1"));
    }

    #[test]
    fn test_route_type_params() {
        assert_eq!(line_group("BUS").unwrap().route_type_param(), Some("bus"));
        assert_eq!(line_group("EXPRESS").unwrap().route_type_param(), Some("xbus"));
        assert_eq!(line_group("SIMEXPRESS").unwrap().route_type_param(), Some("simbus"));
        assert_eq!(line_group("IRT").unwrap().route_type_param(), None);
    }

    #[test]
    fn test_is_bus() {
        assert!(RouteKind::classify("M15").is_bus());
        assert!(!RouteKind::classify("M").is_bus());
        assert!(!RouteKind::classify("SIR").is_bus());
    }
}
