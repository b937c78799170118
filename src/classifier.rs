//! Detection of code systems that live on a remote terminology server.
//!
//! Large terminologies such as SNOMED CT or LOINC cannot be bundled with the
//! FHIR core packages, so validating a code drawn from them means asking a
//! terminology server. Everything else is expected to be resolvable from
//! local definitions.

/// Canonical URI prefixes of code systems that are only available remotely.
pub const EXTERNAL_SYSTEM_PREFIXES: &[&str] = &[
    // SNOMED CT
    "http://snomed.info/sct",
    // LOINC
    "http://loinc.org",
    // RxNorm
    "http://www.nlm.nih.gov/research/umls/rxnorm",
    // ICD family
    "http://hl7.org/fhir/sid/icd-9-cm",
    "http://hl7.org/fhir/sid/icd-10",
    "http://hl7.org/fhir/sid/icd-10-cm",
    "http://www.cms.gov/Medicare/Coding/ICD10",
    "http://id.who.int/icd",
    // CPT
    "http://www.ama-assn.org/go/cpt",
    // ATC
    "http://www.whocc.no/atc",
    // UCUM
    "http://unitsofmeasure.org",
    // BCP-47 language tags
    "urn:ietf:bcp:47",
    // ISO 3166 countries
    "urn:iso:std:iso:3166",
    // ISO 4217 currencies
    "urn:iso:std:iso:4217",
];

/// Returns `true` when `system` starts with one of [`EXTERNAL_SYSTEM_PREFIXES`].
///
/// Matching is an exact, case-sensitive prefix check with no URI
/// normalization, so `https://snomed.info/sct` or `HTTP://loinc.org` are not
/// considered external.
pub fn is_external_system(system: &str) -> bool {
    EXTERNAL_SYSTEM_PREFIXES
        .iter()
        .any(|prefix| system.starts_with(prefix))
}
