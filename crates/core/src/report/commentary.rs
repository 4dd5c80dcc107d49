//! Qualitative ratings derived from fixed thresholds

/// Overall productivity rating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductivityLevel {
    Excellent,
    VeryGood,
    Good,
    NeedsImprovement,
}

impl ProductivityLevel {
    pub fn from_rate(rate: f64) -> Self {
        if rate >= 75.0 {
            Self::Excellent
        } else if rate >= 65.0 {
            Self::VeryGood
        } else if rate >= 50.0 {
            Self::Good
        } else {
            Self::NeedsImprovement
        }
    }

    pub fn assessment(&self, rate: f64) -> String {
        match self {
            Self::Excellent => format!(
                "**Excellent niveau de productivité** : L'employé maintient un excellent équilibre entre travail effectif et temps de pause. \
                 Le taux de productivité de {rate:.1}% indique une gestion optimale du temps de travail."
            ),
            Self::VeryGood => format!(
                "**Très bon niveau de productivité** : L'employé présente un très bon équilibre travail/pause avec {rate:.1}% de temps productif. \
                 Quelques optimisations mineures pourraient être envisagées."
            ),
            Self::Good => format!(
                "**Bon niveau de productivité** : Avec {rate:.1}% de temps productif, l'employé maintient un niveau acceptable. \
                 Une analyse des interruptions pourrait permettre d'optimiser ce taux."
            ),
            Self::NeedsImprovement => format!(
                "**Niveau de productivité à améliorer** : Le taux de {rate:.1}% suggère un déséquilibre dans la répartition du temps. \
                 Il est recommandé d'analyser les causes des interruptions fréquentes."
            ),
        }
    }
}

/// Regularity of daily work time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consistency {
    Steady,
    Moderate,
    Irregular,
}

impl Consistency {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            Self::Steady
        } else if score >= 0.6 {
            Self::Moderate
        } else {
            Self::Irregular
        }
    }

    pub fn assessment(&self) -> &'static str {
        match self {
            Self::Steady => {
                "**Rythme très régulier** : Le volume de travail quotidien varie peu d'un jour à l'autre."
            }
            Self::Moderate => {
                "**Rythme globalement régulier** : Quelques écarts apparaissent entre les journées les plus courtes et les plus longues."
            }
            Self::Irregular => {
                "**Rythme irrégulier** : Le volume de travail varie fortement d'un jour à l'autre. Une planification plus stable est conseillée."
            }
        }
    }
}

/// Balance between work and pauses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkBalance {
    Sustained,
    Balanced,
    PauseHeavy,
}

impl WorkBalance {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= 3.0 {
            Self::Sustained
        } else if ratio >= 1.5 {
            Self::Balanced
        } else {
            Self::PauseHeavy
        }
    }

    pub fn assessment(&self, ratio: f64) -> String {
        match self {
            Self::Sustained => format!(
                "**Rythme soutenu** : Avec un ratio de {ratio:.1}:1, le temps de travail domine largement les pauses."
            ),
            Self::Balanced => format!(
                "**Équilibre travail/pauses satisfaisant** : Le ratio de {ratio:.1}:1 laisse une place raisonnable à la récupération."
            ),
            Self::PauseHeavy => format!(
                "**Pauses importantes** : Le ratio de {ratio:.1}:1 indique une part élevée de pauses dans la journée."
            ),
        }
    }
}

/// How much of the time goes to the five largest activities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Concentration {
    Focused,
    Mixed,
    Scattered,
}

impl Concentration {
    pub fn from_share(top_share: f64) -> Self {
        if top_share >= 80.0 {
            Self::Focused
        } else if top_share >= 50.0 {
            Self::Mixed
        } else {
            Self::Scattered
        }
    }

    pub fn assessment(&self, top_share: f64) -> String {
        match self {
            Self::Focused => format!(
                "**Forte concentration** : Les 5 principales activités représentent {top_share:.1}% du temps suivi. L'effort est centré sur un nombre restreint de sujets."
            ),
            Self::Mixed => format!(
                "**Concentration modérée** : Les 5 principales activités représentent {top_share:.1}% du temps suivi."
            ),
            Self::Scattered => format!(
                "**Activités dispersées** : Les 5 principales activités ne représentent que {top_share:.1}% du temps suivi. Un recentrage sur les priorités pourrait être bénéfique."
            ),
        }
    }
}

/// Position relative to the team average
pub fn team_position(deviation_percent: f64) -> &'static str {
    if deviation_percent >= 10.0 {
        "au-dessus de la moyenne de l'équipe"
    } else if deviation_percent <= -10.0 {
        "en dessous de la moyenne de l'équipe"
    } else {
        "dans la moyenne de l'équipe"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_productivity_thresholds() {
        assert_eq!(ProductivityLevel::from_rate(75.0), ProductivityLevel::Excellent);
        assert_eq!(ProductivityLevel::from_rate(74.9), ProductivityLevel::VeryGood);
        assert_eq!(ProductivityLevel::from_rate(65.0), ProductivityLevel::VeryGood);
        assert_eq!(ProductivityLevel::from_rate(50.0), ProductivityLevel::Good);
        assert_eq!(ProductivityLevel::from_rate(0.0), ProductivityLevel::NeedsImprovement);
        assert!(ProductivityLevel::Good.assessment(55.56).contains("55.6%"));
    }

    #[test]
    fn test_other_thresholds() {
        assert_eq!(Consistency::from_score(0.8), Consistency::Steady);
        assert_eq!(Consistency::from_score(0.6), Consistency::Moderate);
        assert_eq!(Consistency::from_score(0.0), Consistency::Irregular);

        assert_eq!(WorkBalance::from_ratio(3.0), WorkBalance::Sustained);
        assert_eq!(WorkBalance::from_ratio(1.5), WorkBalance::Balanced);
        assert_eq!(WorkBalance::from_ratio(0.0), WorkBalance::PauseHeavy);

        assert_eq!(Concentration::from_share(80.0), Concentration::Focused);
        assert_eq!(Concentration::from_share(50.0), Concentration::Mixed);
        assert_eq!(Concentration::from_share(49.9), Concentration::Scattered);

        assert_eq!(team_position(0.0), "dans la moyenne de l'équipe");
        assert_eq!(team_position(-25.0), "en dessous de la moyenne de l'équipe");
    }
}
