//! Static reference data: language options, proficiency levels and the two
//! skill catalogues keyed by visa type.
//!
//! `label` is the Portuguese text shown in the form, `value` the English text
//! printed on the CV.

use serde::Serialize;

use crate::models::cv::{is_h2a, VisaType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DictEntry {
    pub id: &'static str,
    pub label: &'static str,
    pub value: &'static str,
}

const fn entry(id: &'static str, label: &'static str, value: &'static str) -> DictEntry {
    DictEntry { id, label, value }
}

pub static LANGUAGE_OPTIONS: &[DictEntry] = &[
    entry("portuguese", "Português", "Portuguese"),
    entry("english", "Inglês", "English"),
    entry("spanish", "Espanhol", "Spanish"),
];

pub static LANGUAGE_LEVELS: &[DictEntry] = &[
    entry("native", "Nativo", "Native"),
    entry("advanced", "Avançado", "Advanced"),
    entry("intermediate", "Intermediário", "Intermediate"),
    entry("basic", "Básico", "Basic"),
];

/// H2-B (non-agricultural).
pub static SKILLS_H2B: &[DictEntry] = &[
    entry("room_cleaning", "Limpeza de quartos", "Room cleaning"),
    entry("bathroom_sanitation", "Higienização de banheiros", "Bathroom sanitation"),
    entry("linen_handling", "Manuseio de enxoval", "Linen handling"),
    entry("restocking_supplies", "Reposição de suprimentos", "Restocking supplies"),
    entry("attention_to_detail", "Atenção aos detalhes", "Attention to detail"),
    entry("time_management", "Gestão de tempo", "Time management"),
    entry("teamwork", "Trabalho em equipe", "Teamwork"),
    entry("reliability", "Confiabilidade", "Reliability"),
    entry("guest_assistance", "Apoio ao hóspede", "Guest assistance"),
    entry("customer_service", "Atendimento ao cliente", "Customer service"),
    entry("public_area_cleaning", "Limpeza de áreas comuns", "Public area cleaning"),
    entry("trash_removal", "Coleta de lixo", "Trash removal"),
    entry("light_maintenance", "Manutenção leve", "Light maintenance"),
    entry("basic_tools_handling", "Uso básico de ferramentas", "Basic tools handling"),
    entry("floor_care", "Cuidados com pisos (mop/varrer)", "Floor care (mop/sweep)"),
    entry("vacuuming", "Aspiração", "Vacuuming"),
    entry("glass_cleaning", "Limpeza de vidros", "Glass cleaning"),
    entry("laundry_support", "Apoio na lavanderia", "Laundry support"),
    entry("inventory_checks", "Checagem de estoque", "Inventory checks"),
    entry("following_checklists", "Seguir checklists", "Following checklists"),
    entry("safety_procedures", "Procedimentos de segurança", "Safety procedures"),
    entry("communication", "Comunicação", "Communication"),
    entry("problem_solving", "Resolução de problemas", "Problem solving"),
    entry("fast_paced_routines", "Ritmo acelerado", "Fast-paced routines"),
    entry("organization", "Organização", "Organization"),
    entry("workplace_sanitation", "Higiene do ambiente", "Workplace sanitation"),
    entry("food_service_support", "Apoio em serviço de alimentação", "Food service support"),
    entry("loading_unloading_light", "Carga/descarga (leve)", "Loading/unloading (light)"),
    entry("groundskeeping_light", "Apoio em áreas externas (leve)", "Groundskeeping (light)"),
    entry("routine_inspections", "Inspeções de rotina", "Routine inspections"),
];

/// H2-A (agricultural).
pub static SKILLS_H2A: &[DictEntry] = &[
    entry("planting", "Plantio", "Planting"),
    entry("harvesting", "Colheita", "Harvesting"),
    entry("soil_preparation", "Preparação do solo", "Soil preparation"),
    entry("irrigation_support", "Apoio na irrigação", "Irrigation support"),
    entry("weeding", "Capina", "Weeding"),
    entry("pruning", "Poda", "Pruning"),
    entry("pest_control_support", "Apoio no controle de pragas", "Pest control support"),
    entry("crop_handling", "Manuseio de cultura", "Crop handling"),
    entry("packing_sorting_produce", "Separação/embalagem de produtos", "Packing/Sorting produce"),
    entry("loading_unloading_farm", "Carga/descarga (fazenda)", "Loading/unloading (farm)"),
    entry("equipment_cleaning", "Limpeza de equipamentos", "Equipment cleaning"),
    entry("basic_maintenance", "Manutenção básica", "Basic maintenance"),
    entry("fence_repair_support", "Apoio em reparo de cercas", "Fence repair support"),
    entry("barn_cleaning", "Limpeza de galpões", "Barn cleaning"),
    entry("animal_care_support", "Apoio no cuidado de animais", "Animal care support"),
    entry("feeding_support", "Apoio na alimentação", "Feeding support"),
    entry("watering_livestock", "Água para animais", "Watering livestock"),
    entry("calving_support_basic", "Apoio em parto (básico)", "Calving support (basic)"),
    entry("field_sanitation", "Higiene do campo", "Field sanitation"),
    entry("tool_handling", "Manuseio de ferramentas", "Tool handling"),
    entry("working_outdoors", "Trabalho ao ar livre", "Working outdoors"),
    entry("teamwork", "Trabalho em equipe", "Teamwork"),
    entry("reliability", "Confiabilidade", "Reliability"),
    entry("following_instructions", "Seguir instruções", "Following instructions"),
    entry("quality_checks", "Controle de qualidade", "Quality checks"),
    entry("worksite_organization", "Organização do local", "Worksite organization"),
    entry("route_logistics_support", "Apoio em rota/logística", "Route/Logistics support"),
    entry("record_keeping_basic", "Registros (básico)", "Record keeping (basic)"),
    entry("routine_inspections", "Inspeções de rotina", "Routine inspections"),
];

/// H2-A gets the agricultural catalogue; everything else (H2-B or no visa yet)
/// gets the H2-B one.
pub fn skill_catalog(visa_type: Option<VisaType>) -> &'static [DictEntry] {
    if is_h2a(visa_type) {
        SKILLS_H2A
    } else {
        SKILLS_H2B
    }
}

pub fn find_entry<'a>(catalog: &'a [DictEntry], id: &str) -> Option<&'a DictEntry> {
    catalog.iter().find(|e| e.id == id)
}

/// English CV value for a skill id.
///
/// Ids that are not in the catalogue (e.g. picked under the other visa type
/// before switching) are printed as the raw id rather than dropped.
pub fn resolve_skill<'a>(catalog: &[DictEntry], id: &'a str) -> &'a str {
    match find_entry(catalog, id) {
        Some(e) => e.value,
        None => id,
    }
}

/// Portuguese form label for a skill id, with the same raw-id fallback.
pub fn resolve_skill_label<'a>(catalog: &[DictEntry], id: &'a str) -> &'a str {
    match find_entry(catalog, id) {
        Some(e) => e.label,
        None => id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(SKILLS_H2A.len(), 29);
        assert_eq!(SKILLS_H2B.len(), 30);
        assert_eq!(LANGUAGE_OPTIONS.len(), 3);
        assert_eq!(LANGUAGE_LEVELS.len(), 4);
    }

    #[test]
    fn test_catalog_ids_are_unique() {
        for catalog in [SKILLS_H2A, SKILLS_H2B] {
            let ids: HashSet<_> = catalog.iter().map(|e| e.id).collect();
            assert_eq!(ids.len(), catalog.len(), "duplicate skill id in catalogue");
        }
    }

    #[test]
    fn test_skill_catalog_defaults_to_h2b() {
        assert_eq!(skill_catalog(Some(VisaType::H2A)).len(), SKILLS_H2A.len());
        assert_eq!(skill_catalog(Some(VisaType::H2B)).len(), SKILLS_H2B.len());
        assert_eq!(skill_catalog(None).len(), SKILLS_H2B.len());
    }

    #[test]
    fn test_resolve_skill_known_and_unknown() {
        assert_eq!(resolve_skill(SKILLS_H2A, "harvesting"), "Harvesting");
        assert_eq!(resolve_skill(SKILLS_H2A, "room_cleaning"), "room_cleaning");
        assert_eq!(resolve_skill_label(SKILLS_H2B, "vacuuming"), "Aspiração");
    }

    #[test]
    fn test_language_levels_match_enum_wire_values() {
        for level in LANGUAGE_LEVELS {
            let parsed: Result<crate::models::cv::LanguageLevel, _> =
                serde_json::from_value(serde_json::Value::String(level.value.to_string()));
            assert!(parsed.is_ok(), "level {} must deserialize", level.value);
        }
    }
}
