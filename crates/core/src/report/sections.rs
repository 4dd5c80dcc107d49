//! Section writers, in document order

use std::fmt::{self, Formatter};

use chrono::{DateTime, Locale, NaiveDate, Utc};

use super::commentary::{team_position, Concentration, Consistency, ProductivityLevel, WorkBalance};
use super::Report;
use crate::models::ActivityKind;
use crate::stats::{percent_of, top_share, ActivityBreakdown, UNCATEGORIZED};

/// Rows shown in the daily trend table
const DAILY_ROWS: usize = 10;
/// Rows shown in the activity ranking
const RANKING_ROWS: usize = 10;
/// Activities counted in the concentration share
const CONCENTRATION_TOP: usize = 5;

const WEEKDAYS: [&str; 7] = [
    "Dimanche", "Lundi", "Mardi", "Mercredi", "Jeudi", "Vendredi", "Samedi",
];

fn hours(seconds: f64) -> f64 {
    seconds / 3600.0
}

fn minutes(seconds: f64) -> f64 {
    (seconds / 60.0).round()
}

fn short_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

fn rule(f: &mut Formatter<'_>) -> fmt::Result {
    writeln!(f, "---")?;
    writeln!(f)
}

/// Present and non-empty detail rows
fn rows<T>(section: Option<&Vec<T>>) -> Option<&[T]> {
    section.map(Vec::as_slice).filter(|rows| !rows.is_empty())
}

pub(super) fn summary(f: &mut Formatter<'_>, report: &Report<'_>) -> fmt::Result {
    let account = report.account;
    let totals = &report.summary.totals;
    let counts = &report.summary.counts;

    writeln!(f, "# Rapport d'Activité Professionnel")?;
    writeln!(f, "## {}", account.full_name())?;
    writeln!(f)?;
    rule(f)?;
    writeln!(f, "# Informations Générales")?;
    writeln!(f)?;
    writeln!(
        f,
        "* **Poste** : {}",
        account.position.as_deref().unwrap_or("Non spécifié")
    )?;
    writeln!(f, "* **Email** : {}", account.email)?;
    writeln!(f, "* **Date du rapport** : {}", report.long_date())?;
    writeln!(
        f,
        "* **Période analysée** : {} jour(s) de travail",
        totals.total_days
    )?;
    writeln!(f)?;

    writeln!(f, "## Métriques Clés")?;
    writeln!(f)?;
    writeln!(
        f,
        "* **Moyenne quotidienne de travail** : {:.1}h/jour",
        hours(totals.avg_day_work_seconds)
    )?;
    writeln!(
        f,
        "* **Taux d'activité productive** : {:.1}%",
        report.summary.productivity_rate
    )?;
    writeln!(f, "* **Nombre total de projets** : {}", counts.total_projects)?;
    writeln!(f, "* **Nombre total de tâches** : {}", counts.total_tasks)?;
    writeln!(f, "* **Sessions enregistrées** : {}", counts.total_entries)?;
    writeln!(f)
}

pub(super) fn productivity(f: &mut Formatter<'_>, report: &Report<'_>) -> fmt::Result {
    let summary = report.summary;
    let rate = summary.productivity_rate;

    rule(f)?;
    writeln!(f, "# Analyse de Performance et Productivité")?;
    writeln!(f)?;
    writeln!(f, "## Indicateurs de Productivité")?;
    writeln!(f)?;
    writeln!(f, "* **Taux de productivité global** : {rate:.1}%")?;
    writeln!(
        f,
        "* **Heures travaillées moyennes par jour** : {:.1}h",
        hours(summary.totals.avg_day_work_seconds)
    )?;
    writeln!(f, "* **Ratio travail/pauses** : {:.1}:1", summary.work_break_ratio)?;
    writeln!(
        f,
        "* **Score de régularité** : {:.0}%",
        summary.consistency_score * 100.0
    )?;
    writeln!(
        f,
        "* **Journée la plus courte / la plus longue** : {:.1}h / {:.1}h",
        hours(summary.totals.min_day_work_seconds as f64),
        hours(summary.totals.max_day_work_seconds as f64)
    )?;
    writeln!(f)?;

    writeln!(f, "## Évaluation")?;
    writeln!(f)?;
    writeln!(f, "{}", ProductivityLevel::from_rate(rate).assessment(rate))?;
    writeln!(f)?;
    writeln!(
        f,
        "{}",
        Consistency::from_score(summary.consistency_score).assessment()
    )?;
    writeln!(f)?;
    writeln!(
        f,
        "{}",
        WorkBalance::from_ratio(summary.work_break_ratio).assessment(summary.work_break_ratio)
    )?;
    writeln!(f)
}

pub(super) fn time_of_day(f: &mut Formatter<'_>, report: &Report<'_>) -> fmt::Result {
    let Some(hours_rows) = rows(report.details.and_then(|d| d.hours.as_ref())) else {
        return Ok(());
    };

    rule(f)?;
    writeln!(f, "# Profil Horaire")?;
    writeln!(f)?;
    writeln!(f, "| Heure | Sessions | Temps Total |")?;
    writeln!(f, "|-------|----------|-------------|")?;
    for row in hours_rows {
        writeln!(
            f,
            "| {:02}h | {} | {:.1}h |",
            row.hour,
            row.entry_count,
            hours(row.total_seconds as f64)
        )?;
    }
    writeln!(f)?;

    // First hour wins on ties
    let mut peak = &hours_rows[0];
    for row in hours_rows {
        if row.total_seconds > peak.total_seconds {
            peak = row;
        }
    }
    writeln!(
        f,
        "Plage horaire la plus chargée : {:02}h-{:02}h ({:.1}h cumulées).",
        peak.hour,
        (peak.hour + 1) % 24,
        hours(peak.total_seconds as f64)
    )?;
    writeln!(f)
}

pub(super) fn time_allocation(f: &mut Formatter<'_>, report: &Report<'_>) -> fmt::Result {
    let totals = &report.summary.totals;
    let total = totals.total_seconds() as f64;
    let work = totals.total_work_seconds as f64;
    let brk = totals.total_break_seconds as f64;
    let lunch = totals.total_lunch_seconds as f64;

    rule(f)?;
    writeln!(f, "# Vue d'Ensemble des Temps")?;
    writeln!(f)?;
    writeln!(f, "## Répartition Totale")?;
    writeln!(f)?;
    writeln!(f, "| Catégorie | Heures | Pourcentage |")?;
    writeln!(f, "|-----------|--------|-------------|")?;
    writeln!(
        f,
        "| Temps de travail | {:.1}h | {:.1}% |",
        hours(work),
        percent_of(work, total)
    )?;
    writeln!(
        f,
        "| Pauses courtes | {:.1}h | {:.1}% |",
        hours(brk),
        percent_of(brk, total)
    )?;
    writeln!(
        f,
        "| Pause déjeuner | {:.1}h | {:.1}% |",
        hours(lunch),
        percent_of(lunch, total)
    )?;
    writeln!(f, "| **TOTAL** | **{:.1}h** | **100%** |", hours(total))?;
    writeln!(f)
}

pub(super) fn weekdays(f: &mut Formatter<'_>, report: &Report<'_>) -> fmt::Result {
    let Some(weekday_rows) = rows(report.details.and_then(|d| d.weekdays.as_ref())) else {
        return Ok(());
    };

    rule(f)?;
    writeln!(f, "# Répartition Hebdomadaire")?;
    writeln!(f)?;
    writeln!(f, "| Jour | Jours travaillés | Travail moyen | Productivité |")?;
    writeln!(f, "|------|------------------|---------------|--------------|")?;
    for row in weekday_rows {
        writeln!(
            f,
            "| {} | {} | {:.1}h | {:.1}% |",
            WEEKDAYS[usize::from(row.weekday % 7)],
            row.day_count,
            hours(row.avg_work_seconds),
            row.productivity_score
        )?;
    }
    writeln!(f)
}

pub(super) fn daily_trend(f: &mut Formatter<'_>, report: &Report<'_>) -> fmt::Result {
    let Some(days) = rows(report.details.and_then(|d| d.daily.as_ref())) else {
        return Ok(());
    };

    rule(f)?;
    writeln!(f, "# Détail Journalier")?;
    writeln!(f)?;
    writeln!(f, "| Date | Heures Travail | Pauses | Déjeuner | Productivité |")?;
    writeln!(f, "|------|---------------|---------|----------|-------------|")?;
    for day in days.iter().take(DAILY_ROWS) {
        writeln!(
            f,
            "| {} | {:.1}h | {:.1}h | {:.1}h | {}% |",
            short_date(day.date),
            hours(day.work_seconds as f64),
            hours(day.break_seconds as f64),
            hours(day.lunch_seconds as f64),
            day.productivity_rate
        )?;
    }
    writeln!(f)
}

pub(super) fn activity_ranking(f: &mut Formatter<'_>, report: &Report<'_>) -> fmt::Result {
    rule(f)?;
    writeln!(f, "# Analyse des Activités")?;
    writeln!(f)?;

    if report.ranking.is_empty() {
        writeln!(f, "Aucune activité enregistrée sur la période analysée.")?;
        return writeln!(f);
    }

    writeln!(f, "## Top 10 des Activités par Temps")?;
    writeln!(f)?;
    writeln!(f, "| # | Activité | Type | Temps Total | Sessions | Temps Moyen |")?;
    writeln!(f, "|---|----------|------|-------------|----------|-------------|")?;
    for (index, activity) in report.ranking.iter().take(RANKING_ROWS).enumerate() {
        let (icon, kind) = match activity.kind {
            Some(ActivityKind::Project) => ("📁", "Projet"),
            Some(ActivityKind::Task) => ("✓", "Tâche"),
            None => ("•", UNCATEGORIZED),
        };
        writeln!(
            f,
            "| {} | {} {} | {} | {:.1}h | {} | {}min |",
            index + 1,
            icon,
            activity.name,
            kind,
            hours(activity.total_seconds as f64),
            activity.occurrences,
            minutes(activity.avg_seconds())
        )?;
    }
    writeln!(f)?;

    let share = top_share(&report.ranking, CONCENTRATION_TOP);
    writeln!(f, "{}", Concentration::from_share(share).assessment(share))?;
    writeln!(f)
}

fn breakdown_rows(
    f: &mut Formatter<'_>,
    title: &str,
    rows: &[ActivityBreakdown],
) -> fmt::Result {
    writeln!(f, "## {title}")?;
    writeln!(f)?;
    for row in rows {
        writeln!(f, "### {}", row.name)?;
        writeln!(f)?;
        if let Some(client) = row.client.as_deref().filter(|c| !c.is_empty()) {
            writeln!(f, "* **Client** : {client}")?;
        }
        if let Some(description) = row.description.as_deref().filter(|d| !d.is_empty()) {
            writeln!(f, "* **Description** : {description}")?;
        }
        writeln!(f, "* **Temps total** : {:.1}h", hours(row.total_seconds as f64))?;
        writeln!(f, "* **Part du temps suivi** : {:.1}%", row.share_percent)?;
        writeln!(f, "* **Nombre de sessions** : {}", row.session_count)?;
        writeln!(
            f,
            "* **Durée moyenne par session** : {} minutes (min {} / max {})",
            minutes(row.avg_session_seconds),
            minutes(row.min_session_seconds as f64),
            minutes(row.max_session_seconds as f64)
        )?;
        writeln!(
            f,
            "* **Période** : du {} au {} ({} jour(s))",
            short_date(row.first_date),
            short_date(row.last_date),
            row.active_day_span
        )?;
        writeln!(f)?;
    }
    Ok(())
}

pub(super) fn project_details(f: &mut Formatter<'_>, report: &Report<'_>) -> fmt::Result {
    match rows(report.details.and_then(|d| d.projects.as_ref())) {
        Some(projects) => breakdown_rows(f, "Analyse Détaillée des Projets", projects),
        None => Ok(()),
    }
}

pub(super) fn task_details(f: &mut Formatter<'_>, report: &Report<'_>) -> fmt::Result {
    match rows(report.details.and_then(|d| d.tasks.as_ref())) {
        Some(tasks) => breakdown_rows(f, "Analyse Détaillée des Tâches", tasks),
        None => Ok(()),
    }
}

pub(super) fn team(f: &mut Formatter<'_>, report: &Report<'_>) -> fmt::Result {
    let Some(team) = report
        .details
        .and_then(|d| d.team.as_ref())
        .filter(|t| t.team_size > 0)
    else {
        return Ok(());
    };

    rule(f)?;
    writeln!(f, "# Comparaison avec l'Équipe")?;
    writeln!(f)?;
    writeln!(f, "| Indicateur | Employé | Moyenne équipe | Écart |")?;
    writeln!(f, "|------------|---------|----------------|-------|")?;
    writeln!(
        f,
        "| Temps de travail | {:.1}h | {:.1}h | {:+.1}% |",
        hours(team.account_work_seconds as f64),
        hours(team.team_avg_work_seconds),
        team.work_deviation_percent
    )?;
    writeln!(
        f,
        "| Activités par jour | {:.1} | {:.1} | {:+.1}% |",
        team.account_daily_activities,
        team.team_avg_daily_activities,
        team.activity_deviation_percent
    )?;
    writeln!(f)?;
    writeln!(f, "* **Taille de l'équipe** : {} employé(s)", team.team_size)?;
    writeln!(f)?;
    writeln!(
        f,
        "Le temps de travail se situe {}, et le nombre d'activités quotidiennes {}.",
        team_position(team.work_deviation_percent),
        team_position(team.activity_deviation_percent)
    )?;
    writeln!(f)
}

pub(super) fn recommendations(f: &mut Formatter<'_>, report: &Report<'_>) -> fmt::Result {
    let summary = report.summary;
    let rate = summary.productivity_rate;
    let avg_daily_hours = hours(summary.totals.avg_day_work_seconds);

    rule(f)?;
    writeln!(f, "# Bilan et Recommandations")?;
    writeln!(f)?;

    writeln!(f, "## Points Forts")?;
    writeln!(f)?;
    if summary.counts.total_projects > 5 || summary.counts.total_tasks > 10 {
        writeln!(
            f,
            "* Grande diversité d'activités démontrant une polyvalence appréciable"
        )?;
    }
    if avg_daily_hours >= 7.0 {
        writeln!(
            f,
            "* Engagement quotidien solide avec une moyenne de {avg_daily_hours:.1}h par jour"
        )?;
    }
    if rate >= 65.0 {
        writeln!(
            f,
            "* Excellente gestion du temps avec un taux de productivité de {rate:.1}%"
        )?;
    }
    writeln!(
        f,
        "* Suivi rigoureux des activités facilitant l'analyse et le reporting"
    )?;
    writeln!(f)?;

    writeln!(f, "## Axes d'Amélioration")?;
    writeln!(f)?;
    writeln!(f, "* **Optimisation des pauses** : Planifier des pauses régulières et courtes plutôt que longues et dispersées")?;
    writeln!(f, "* **Focus sur les priorités** : Concentrer l'effort sur les projets à fort impact")?;
    writeln!(f, "* **Documentation** : Maintenir un journal de bord pour capturer les apprentissages et défis")?;
    if summary.counts.total_projects < 3 {
        writeln!(f, "* **Diversification** : Participer à davantage de projets pour développer de nouvelles compétences")?;
    }
    writeln!(f)?;

    writeln!(f, "## Court Terme (1-2 semaines)")?;
    writeln!(f)?;
    writeln!(f, "1. **Structurer la journée** : Définir des blocs de temps dédiés pour les tâches complexes")?;
    writeln!(f, "2. **Réduire les interruptions** : Identifier et minimiser les sources de distraction")?;
    writeln!(f, "3. **Optimiser les réunions** : S'assurer que chaque réunion a un objectif clair et un ordre du jour")?;
    writeln!(f)?;

    writeln!(f, "## Moyen Terme (1 mois)")?;
    writeln!(f)?;
    writeln!(f, "1. **Développement de compétences** : Identifier 2-3 compétences clés à améliorer")?;
    writeln!(f, "2. **Mentorat** : Partager l'expertise sur les projets maîtrisés")?;
    writeln!(f, "3. **Automatisation** : Identifier les tâches répétitives à automatiser")?;
    writeln!(f)?;

    writeln!(f, "## Long Terme (3-6 mois)")?;
    writeln!(f)?;
    writeln!(f, "1. **Montée en compétence** : Viser des projets plus stratégiques et complexes")?;
    writeln!(f, "2. **Leadership** : Prendre des responsabilités de coordination sur certains projets")?;
    writeln!(f, "3. **Innovation** : Proposer des améliorations de processus basées sur l'expérience terrain")?;
    writeln!(f)
}

pub(super) fn conclusion(f: &mut Formatter<'_>, report: &Report<'_>) -> fmt::Result {
    let summary = report.summary;
    let counts = &summary.counts;

    rule(f)?;
    writeln!(f, "# Conclusion")?;
    writeln!(f)?;
    writeln!(
        f,
        "Ce rapport d'activité détaillé présente une analyse complète des performances de **{}** sur la période étudiée. \
         Avec **{:.1}h de travail effectif** réparties sur **{} jours**, et une implication dans **{} activités distinctes**, \
         l'employé démontre un engagement solide.",
        report.account.full_name(),
        hours(summary.totals.total_work_seconds as f64),
        summary.totals.total_days,
        counts.total_projects + counts.total_tasks
    )?;
    writeln!(f)?;
    writeln!(
        f,
        "Le **taux de productivité de {:.1}%** et la **diversité des activités** témoignent d'une contribution significative à l'organisation. \
         Les recommandations ci-dessus visent à maintenir et améliorer ces performances dans la durée.",
        summary.productivity_rate
    )?;
    writeln!(f)?;
    rule(f)?;
    writeln!(
        f,
        "*Rapport généré automatiquement le {} à {}*",
        report.long_date(),
        report.generated_at.format("%H:%M:%S")
    )?;
    write!(f, "*Données extraites du système de suivi Timer Journalier*")
}

/// Long French date, e.g. `mardi 3 mars 2026`
pub(super) fn long_french_date(at: DateTime<Utc>) -> String {
    at.format_localized("%A %-d %B %Y", Locale::fr_FR).to_string()
}
