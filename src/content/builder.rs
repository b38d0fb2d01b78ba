//! Normalizes plan data into sections.

use super::{BulletItem, ContentBlock, HeadingLevel, Section, SectionKind};
use crate::model::{
    Bsc, BscPerspective, Company, FieldValue, InitiativeSummary, Insight, ObjectiveSummary, Ogsm,
    Okr, Pestel, PriorityMatrix, StrategicPlanData, Wbr,
};

/// Fallback for absent text fields.
pub const TO_BE_DEFINED: &str = "A definir";

/// Fallback for absent numeric or value fields.
pub const NOT_AVAILABLE: &str = "N/A";

/// Build the ordered section list for a plan.
///
/// Cover and summary are always present. Every other section appears exactly
/// when its sub-tree is present in `data`, in canonical order. Chart
/// references are appended as raster regions to the section they name.
pub fn build_sections(data: &StrategicPlanData) -> Vec<Section> {
    let mut sections = vec![cover(&data.company), summary(data)];

    if let Some(ref ogsm) = data.ogsm {
        sections.push(ogsm_section(ogsm));
    }
    if let Some(ref okrs) = data.okrs {
        sections.push(okr_section(okrs));
    }
    if let Some(ref bsc) = data.bsc {
        sections.push(bsc_section(bsc));
    }
    if let Some(ref matriz) = data.matriz {
        sections.push(matrix_section(matriz));
    }
    if let Some(ref pestel) = data.pestel {
        sections.push(pestel_section(pestel));
    }
    if let Some(ref wbr) = data.wbr {
        sections.push(wbr_section(wbr));
    }
    if let Some(ref objectives) = data.objectives {
        sections.push(objectives_section(objectives));
    }
    if let Some(ref insights) = data.insights {
        sections.push(insights_section(insights));
    }

    for chart in &data.charts {
        let Some(kind) = SectionKind::from_key(&chart.section) else {
            log::warn!("Ignoring chart '{}': unknown section '{}'", chart.region, chart.section);
            continue;
        };
        if kind == SectionKind::Cover {
            log::warn!("Ignoring chart '{}': the cover has a fixed layout", chart.region);
            continue;
        }
        match sections.iter_mut().find(|s| s.kind == kind) {
            Some(section) => section.blocks.push(ContentBlock::RasterRegion {
                region: chart.region.clone(),
                caption: present(&chart.caption).map(str::to_string),
            }),
            None => log::debug!(
                "Chart '{}' targets absent section {:?}",
                chart.region,
                kind
            ),
        }
    }

    sections
}

/// Trimmed text if the field carries any.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn text_or_tbd(value: &Option<String>) -> String {
    present(value).unwrap_or(TO_BE_DEFINED).to_string()
}

fn value_or_na(value: &Option<FieldValue>) -> String {
    match value {
        Some(v) if !v.is_blank() => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn pair(label: &str, value: String) -> (String, String) {
    (label.to_string(), value)
}

fn sub_heading(text: impl Into<String>) -> ContentBlock {
    ContentBlock::heading(text, HeadingLevel::Sub)
}

fn bullets<I: IntoIterator<Item = String>>(items: I) -> ContentBlock {
    ContentBlock::BulletList {
        items: items.into_iter().map(BulletItem::new).collect(),
    }
}

fn company_name(company: &Company) -> String {
    match company.name.trim() {
        "" => TO_BE_DEFINED.to_string(),
        name => name.to_string(),
    }
}

fn cover(company: &Company) -> Section {
    let mut blocks = vec![ContentBlock::heading(company_name(company), HeadingLevel::Section)];
    if let Some(sector) = present(&company.sector) {
        blocks.push(ContentBlock::muted(sector));
    }
    Section {
        kind: SectionKind::Cover,
        title: SectionKind::Cover.title().to_string(),
        blocks,
    }
}

fn summary(data: &StrategicPlanData) -> Section {
    let company = &data.company;
    let mut section = Section::new(SectionKind::Summary);

    let mut pairs = vec![pair("Empresa", company_name(company))];
    if let Some(sector) = present(&company.sector) {
        pairs.push(pair("Setor", sector.to_string()));
    }
    pairs.push(pair("Missão", text_or_tbd(&company.mission)));
    pairs.push(pair("Visão", text_or_tbd(&company.vision)));
    pairs.push(pair("Valores", text_or_tbd(&company.values)));
    section.blocks.push(ContentBlock::KeyValue { pairs });

    let mut contents = Vec::new();
    if let Some(ref ogsm) = data.ogsm {
        contents.push(format!("{} ({} metas)", SectionKind::Ogsm.title(), ogsm.goals.len()));
    }
    if let Some(ref okrs) = data.okrs {
        contents.push(format!("{} ({} objetivos)", SectionKind::Okr.title(), okrs.len()));
    }
    if let Some(ref bsc) = data.bsc {
        let covered = [&bsc.financial, &bsc.customer, &bsc.process, &bsc.learning]
            .iter()
            .filter(|p| p.covered)
            .count();
        contents.push(format!(
            "{} ({} de 4 perspectivas cobertas)",
            SectionKind::Bsc.title(),
            covered
        ));
    }
    if let Some(ref matriz) = data.matriz {
        let total = matriz.quick_wins.len()
            + matriz.major_projects.len()
            + matriz.fill_ins.len()
            + matriz.thankless_tasks.len();
        contents.push(format!("{} ({} iniciativas)", SectionKind::Matrix.title(), total));
    }
    if data.pestel.is_some() {
        contents.push(SectionKind::Pestel.title().to_string());
    }
    if data.wbr.is_some() {
        contents.push(SectionKind::Wbr.title().to_string());
    }
    if let Some(ref objectives) = data.objectives {
        contents.push(format!(
            "{} ({})",
            SectionKind::Objectives.title(),
            objectives.len()
        ));
    }
    if let Some(ref insights) = data.insights {
        contents.push(format!("{} ({})", SectionKind::Insights.title(), insights.len()));
    }

    section.blocks.push(sub_heading("Conteúdo do plano"));
    if contents.is_empty() {
        section
            .blocks
            .push(ContentBlock::muted("Nenhum framework preenchido até o momento."));
    } else {
        section.blocks.push(bullets(contents));
    }
    section
}

fn ogsm_section(ogsm: &Ogsm) -> Section {
    let mut section = Section::new(SectionKind::Ogsm);
    section.blocks.push(ContentBlock::KeyValue {
        pairs: vec![pair("Objetivo", text_or_tbd(&ogsm.objective))],
    });

    if ogsm.goals.is_empty() {
        section
            .blocks
            .push(ContentBlock::muted(format!("Metas: {}", TO_BE_DEFINED)));
    }
    for (i, goal) in ogsm.goals.iter().enumerate() {
        section.blocks.push(sub_heading(format!(
            "Meta {}: {}",
            i + 1,
            text_or_tbd(&goal.title)
        )));
        if goal.strategies.is_empty() {
            section
                .blocks
                .push(ContentBlock::muted(format!("Estratégias: {}", TO_BE_DEFINED)));
            continue;
        }
        let items = goal
            .strategies
            .iter()
            .map(|strategy| BulletItem {
                text: text_or_tbd(&strategy.title),
                children: strategy
                    .measures
                    .iter()
                    .map(|m| format!("Medida: {}", m.trim()))
                    .collect(),
            })
            .collect();
        section.blocks.push(ContentBlock::BulletList { items });
    }
    section
}

fn okr_section(okrs: &[Okr]) -> Section {
    let mut section = Section::new(SectionKind::Okr);
    if okrs.is_empty() {
        section
            .blocks
            .push(ContentBlock::muted(format!("Objetivos: {}", TO_BE_DEFINED)));
    }
    for (i, okr) in okrs.iter().enumerate() {
        section.blocks.push(sub_heading(format!(
            "Objetivo {}: {}",
            i + 1,
            text_or_tbd(&okr.objective)
        )));
        if okr.key_results.is_empty() {
            section.blocks.push(ContentBlock::muted(format!(
                "Resultados-chave: {}",
                TO_BE_DEFINED
            )));
            continue;
        }
        let items = okr
            .key_results
            .iter()
            .map(|kr| {
                BulletItem::new(text_or_tbd(&kr.description))
                    .with_child(format!("Meta: {}", value_or_na(&kr.target)))
                    .with_child(format!("Atual: {}", value_or_na(&kr.current_value)))
            })
            .collect();
        section.blocks.push(ContentBlock::BulletList { items });
    }
    section
}

fn bsc_section(bsc: &Bsc) -> Section {
    let mut section = Section::new(SectionKind::Bsc);
    let perspectives: [(&str, &BscPerspective); 4] = [
        ("Financeira", &bsc.financial),
        ("Clientes", &bsc.customer),
        ("Processos Internos", &bsc.process),
        ("Aprendizado e Crescimento", &bsc.learning),
    ];
    for (name, perspective) in perspectives {
        section.blocks.push(sub_heading(format!("Perspectiva {}", name)));
        let coverage = if perspective.covered {
            "Coberta"
        } else {
            "Não coberta"
        };
        section.blocks.push(ContentBlock::KeyValue {
            pairs: vec![pair("Cobertura", coverage.to_string())],
        });
        if perspective.items.is_empty() {
            section
                .blocks
                .push(ContentBlock::muted(format!("Itens: {}", TO_BE_DEFINED)));
        } else {
            section
                .blocks
                .push(bullets(perspective.items.iter().map(|s| s.trim().to_string())));
        }
        if let Some(suggestion) = present(&perspective.suggestion) {
            section
                .blocks
                .push(ContentBlock::muted(format!("Sugestão: {}", suggestion)));
        }
    }
    section
}

fn matrix_section(matriz: &PriorityMatrix) -> Section {
    let mut section = Section::new(SectionKind::Matrix);
    let buckets: [(&str, &Vec<InitiativeSummary>); 4] = [
        ("Ganhos Rápidos (alto impacto, baixo esforço)", &matriz.quick_wins),
        ("Grandes Projetos (alto impacto, alto esforço)", &matriz.major_projects),
        ("Tarefas Complementares (baixo impacto, baixo esforço)", &matriz.fill_ins),
        ("Tarefas Ingratas (baixo impacto, alto esforço)", &matriz.thankless_tasks),
    ];
    for (name, initiatives) in buckets {
        section.blocks.push(sub_heading(name));
        if initiatives.is_empty() {
            section
                .blocks
                .push(ContentBlock::muted("Nenhuma iniciativa neste quadrante."));
            continue;
        }
        let items = initiatives
            .iter()
            .map(|initiative| {
                let mut item = BulletItem::new(text_or_tbd(&initiative.title)).with_child(format!(
                    "Impacto: {} | Esforço: {}",
                    value_or_na(&initiative.impact),
                    value_or_na(&initiative.effort)
                ));
                if let Some(why) = present(&initiative.justification) {
                    item = item.with_child(format!("Justificativa: {}", why));
                }
                item
            })
            .collect();
        section.blocks.push(ContentBlock::BulletList { items });
    }
    section
}

fn pestel_section(pestel: &Pestel) -> Section {
    let mut section = Section::new(SectionKind::Pestel);
    section.blocks.push(ContentBlock::KeyValue {
        pairs: vec![
            pair("Político", text_or_tbd(&pestel.political)),
            pair("Econômico", text_or_tbd(&pestel.economic)),
            pair("Social", text_or_tbd(&pestel.social)),
            pair("Tecnológico", text_or_tbd(&pestel.technological)),
            pair("Ambiental", text_or_tbd(&pestel.environmental)),
            pair("Legal", text_or_tbd(&pestel.legal)),
        ],
    });

    let lists = [
        ("Impactos", &pestel.impacts),
        ("Oportunidades", &pestel.opportunities),
        ("Ameaças", &pestel.threats),
    ];
    for (label, list) in lists {
        let Some(list) = list else { continue };
        section.blocks.push(sub_heading(label));
        if list.is_empty() {
            section.blocks.push(ContentBlock::muted(TO_BE_DEFINED));
        } else {
            section
                .blocks
                .push(bullets(list.iter().map(|s| s.trim().to_string())));
        }
    }
    section
}

fn wbr_section(wbr: &Wbr) -> Section {
    let mut section = Section::new(SectionKind::Wbr);
    section.blocks.push(ContentBlock::KeyValue {
        pairs: vec![pair(
            "Meta Crucialmente Importante (MCI)",
            text_or_tbd(&wbr.most_crucial_objective),
        )],
    });

    section.blocks.push(sub_heading("Cadência de Responsabilidade"));
    let cadence = wbr.cadence.clone().unwrap_or_default();
    let participants = if cadence.participants.is_empty() {
        TO_BE_DEFINED.to_string()
    } else {
        cadence.participants.join(", ")
    };
    section.blocks.push(ContentBlock::KeyValue {
        pairs: vec![
            pair("Frequência", text_or_tbd(&cadence.frequency)),
            pair("Dia", text_or_tbd(&cadence.day)),
            pair("Horário", text_or_tbd(&cadence.time)),
            pair("Participantes", participants),
        ],
    });

    section.blocks.push(sub_heading("Placar"));
    let scoreboard = wbr.scoreboard.clone().unwrap_or_default();
    section.blocks.push(ContentBlock::KeyValue {
        pairs: vec![pair(
            "Medida de resultado (lag)",
            text_or_tbd(&scoreboard.lag_measure),
        )],
    });
    if scoreboard.lead_measures.is_empty() {
        section.blocks.push(ContentBlock::muted(format!(
            "Medidas de direção (lead): {}",
            TO_BE_DEFINED
        )));
    } else {
        let items = scoreboard
            .lead_measures
            .iter()
            .map(|lead| {
                BulletItem::new(text_or_tbd(&lead.name))
                    .with_child(format!("Meta: {}", value_or_na(&lead.target)))
                    .with_child(format!("Atual: {}", value_or_na(&lead.current)))
            })
            .collect();
        section.blocks.push(ContentBlock::BulletList { items });
    }
    section
}

fn objectives_section(objectives: &[ObjectiveSummary]) -> Section {
    let mut section = Section::new(SectionKind::Objectives);
    if objectives.is_empty() {
        section
            .blocks
            .push(ContentBlock::muted(format!("Objetivos: {}", TO_BE_DEFINED)));
    }
    for objective in objectives {
        section.blocks.push(sub_heading(text_or_tbd(&objective.title)));
        if let Some(description) = present(&objective.description) {
            section.blocks.push(ContentBlock::paragraph(description));
        }
        let progress = match objective.progress {
            Some(ref p) if !p.is_blank() => format!("{}%", p),
            _ => NOT_AVAILABLE.to_string(),
        };
        section.blocks.push(ContentBlock::KeyValue {
            pairs: vec![
                pair("Status", text_or_tbd(&objective.status)),
                pair("Progresso", progress),
            ],
        });

        section.blocks.push(ContentBlock::muted("Iniciativas"));
        if objective.initiatives.is_empty() {
            section.blocks.push(ContentBlock::muted(TO_BE_DEFINED));
        } else {
            let items = objective
                .initiatives
                .iter()
                .map(|initiative| {
                    let mut item = BulletItem::new(text_or_tbd(&initiative.title))
                        .with_child(format!("Status: {}", text_or_tbd(&initiative.status)));
                    if let Some(owner) = present(&initiative.responsible) {
                        item = item.with_child(format!("Responsável: {}", owner));
                    }
                    if let Some(due) = present(&initiative.due_date) {
                        item = item.with_child(format!("Prazo: {}", due));
                    }
                    item
                })
                .collect();
            section.blocks.push(ContentBlock::BulletList { items });
        }

        section.blocks.push(ContentBlock::muted("Métricas"));
        if objective.metrics.is_empty() {
            section.blocks.push(ContentBlock::muted(TO_BE_DEFINED));
        } else {
            let items = objective
                .metrics
                .iter()
                .map(|metric| {
                    BulletItem::new(text_or_tbd(&metric.name))
                        .with_child(format!("Atual: {}", value_or_na(&metric.current_value)))
                        .with_child(format!("Meta: {}", value_or_na(&metric.target)))
                })
                .collect();
            section.blocks.push(ContentBlock::BulletList { items });
        }
    }
    section
}

fn insights_section(insights: &[Insight]) -> Section {
    let mut section = Section::new(SectionKind::Insights);
    if insights.is_empty() {
        section
            .blocks
            .push(ContentBlock::muted(format!("Insights: {}", TO_BE_DEFINED)));
    }
    for insight in insights {
        section.blocks.push(sub_heading(text_or_tbd(&insight.title)));
        section.blocks.push(ContentBlock::KeyValue {
            pairs: vec![
                pair("Tipo", text_or_tbd(&insight.kind)),
                pair("Prioridade", text_or_tbd(&insight.priority)),
            ],
        });
        section
            .blocks
            .push(ContentBlock::paragraph(text_or_tbd(&insight.description)));
    }
    section
}
