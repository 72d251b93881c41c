//! Query builder for the `/discover/movie` endpoint.
//!
//! Mirrors the "personalized recommendations" form: a set of genre ids,
//! a coarse mood, and a runtime band, turned into discover parameters.

/// Mood options of the discover form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoverMood {
    Happy,
    Sad,
    Excited,
    Relaxed,
}

impl DiscoverMood {
    /// Parse a mood label, ignoring case. Unknown labels give `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "happy" => Some(DiscoverMood::Happy),
            "sad" => Some(DiscoverMood::Sad),
            "excited" => Some(DiscoverMood::Excited),
            "relaxed" => Some(DiscoverMood::Relaxed),
            _ => None,
        }
    }

    fn genre_ids(self) -> &'static [u32] {
        match self {
            DiscoverMood::Happy => &[35, 10751],
            DiscoverMood::Sad => &[18],
            DiscoverMood::Excited => &[28, 12],
            DiscoverMood::Relaxed => &[99, 36],
        }
    }

    fn sort_order(self) -> SortOrder {
        match self {
            DiscoverMood::Happy | DiscoverMood::Excited => SortOrder::PopularityDesc,
            DiscoverMood::Sad | DiscoverMood::Relaxed => SortOrder::VoteAverageDesc,
        }
    }
}

/// Runtime bands of the discover form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeBand {
    /// 90 minutes or less
    Short,
    /// 90 to 120 minutes
    Medium,
    /// 120 minutes or more
    Long,
}

impl RuntimeBand {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "short" => Some(RuntimeBand::Short),
            "medium" => Some(RuntimeBand::Medium),
            "long" => Some(RuntimeBand::Long),
            _ => None,
        }
    }

    fn bounds(self) -> (Option<u32>, Option<u32>) {
        match self {
            RuntimeBand::Short => (None, Some(90)),
            RuntimeBand::Medium => (Some(90), Some(120)),
            RuntimeBand::Long => (Some(120), None),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    PopularityDesc,
    VoteAverageDesc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::PopularityDesc => "popularity.desc",
            SortOrder::VoteAverageDesc => "vote_average.desc",
        }
    }
}

/// Parameters for one discover request.
///
/// ## Usage
/// ```ignore
/// let query = DiscoverQuery::new()
///     .mood(DiscoverMood::Excited)
///     .runtime(RuntimeBand::Short);
/// let movies = client.discover(&query).await?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoverQuery {
    genre_ids: Vec<u32>,
    mood: Option<DiscoverMood>,
    runtime: Option<RuntimeBand>,
    sort: Option<SortOrder>,
    page: Option<u32>,
}

impl DiscoverQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a genre id (builder pattern). Repeat to require several.
    pub fn genre(mut self, genre_id: u32) -> Self {
        if !self.genre_ids.contains(&genre_id) {
            self.genre_ids.push(genre_id);
        }
        self
    }

    pub fn mood(mut self, mood: DiscoverMood) -> Self {
        self.mood = Some(mood);
        self
    }

    pub fn runtime(mut self, band: RuntimeBand) -> Self {
        self.runtime = Some(band);
        self
    }

    /// Override the sort order the mood would pick.
    pub fn sort_by(mut self, order: SortOrder) -> Self {
        self.sort = Some(order);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Render the query parameters.
    ///
    /// Explicitly chosen genres win over the mood's genres; the mood still
    /// decides the sort order unless one was set.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        let genres: Vec<u32> = if !self.genre_ids.is_empty() {
            self.genre_ids.clone()
        } else {
            self.mood
                .map(|m| m.genre_ids().to_vec())
                .unwrap_or_default()
        };
        if !genres.is_empty() {
            let joined = genres
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(",");
            params.push(("with_genres", joined));
        }

        let sort = self
            .sort
            .or_else(|| self.mood.map(DiscoverMood::sort_order))
            .unwrap_or(SortOrder::PopularityDesc);
        params.push(("sort_by", sort.as_str().to_string()));

        if let Some(band) = self.runtime {
            let (gte, lte) = band.bounds();
            if let Some(gte) = gte {
                params.push(("with_runtime.gte", gte.to_string()));
            }
            if let Some(lte) = lte {
                params.push(("with_runtime.lte", lte.to_string()));
            }
        }

        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }

        params
    }
}
