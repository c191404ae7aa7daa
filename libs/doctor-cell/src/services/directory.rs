use tracing::debug;

use shared_models::clinic::{Doctor, Specialty};

use crate::models::{DirectoryError, DoctorWithSpecialty};

/// Seed table: specialty id, specialty name, then (doctor id, doctor name) pairs.
const CLINIC_SPECIALTIES: &[(&str, &str, &[(&str, &str)])] = &[
    ("s1", "Cardiologia", &[("d1", "Dr. Carlos Santos"), ("d2", "Dra. Maria Lima")]),
    ("s2", "Neurologia", &[("d3", "Dr. Pedro Oliveira"), ("d4", "Dra. Ana Costa")]),
    ("s3", "Oftalmologia", &[("d5", "Dr. João Alves"), ("d6", "Dra. Paula Rocha")]),
    ("s4", "Pediatria", &[("d7", "Dra. Beatriz Silva"), ("d8", "Dr. Rafael Mendes")]),
    ("s5", "Ortopedia", &[("d9", "Dr. Fernando Costa"), ("d10", "Dra. Juliana Pires")]),
    ("s6", "Clínica Geral", &[("d11", "Dr. Lucas Ferreira"), ("d12", "Dra. Camila Souza")]),
];

/// Immutable catalogue of specialties and the doctors practising them.
#[derive(Debug, Clone)]
pub struct DoctorDirectory {
    specialties: Vec<Specialty>,
}

impl DoctorDirectory {
    pub fn new(specialties: Vec<Specialty>) -> Self {
        Self { specialties }
    }

    /// The clinic's fixed roster.
    pub fn clinic_default() -> Self {
        let specialties = CLINIC_SPECIALTIES
            .iter()
            .map(|(id, name, doctors)| Specialty {
                id: id.to_string(),
                name: name.to_string(),
                doctors: doctors
                    .iter()
                    .map(|(doctor_id, doctor_name)| Doctor {
                        id: doctor_id.to_string(),
                        name: doctor_name.to_string(),
                        specialty_id: id.to_string(),
                    })
                    .collect(),
            })
            .collect();

        Self::new(specialties)
    }

    pub fn specialties(&self) -> &[Specialty] {
        &self.specialties
    }

    pub fn specialty(&self, specialty_id: &str) -> Result<&Specialty, DirectoryError> {
        self.specialties
            .iter()
            .find(|specialty| specialty.id == specialty_id)
            .ok_or_else(|| DirectoryError::SpecialtyNotFound(specialty_id.to_string()))
    }

    pub fn doctor(&self, doctor_id: &str) -> Result<&Doctor, DirectoryError> {
        self.doctors()
            .find(|doctor| doctor.id == doctor_id)
            .ok_or_else(|| DirectoryError::DoctorNotFound(doctor_id.to_string()))
    }

    pub fn doctors(&self) -> impl Iterator<Item = &Doctor> {
        self.specialties
            .iter()
            .flat_map(|specialty| specialty.doctors.iter())
    }

    pub fn doctor_with_specialty(
        &self,
        doctor_id: &str,
    ) -> Result<DoctorWithSpecialty, DirectoryError> {
        let doctor = self.doctor(doctor_id)?;
        let specialty = self.specialty(&doctor.specialty_id)?;

        Ok(DoctorWithSpecialty {
            doctor: doctor.clone(),
            specialty: specialty.into(),
        })
    }

    /// Resolves a patient's specialty + doctor pick, checking the doctor is
    /// one the specialty lists.
    pub fn resolve_selection(
        &self,
        specialty_id: &str,
        doctor_id: &str,
    ) -> Result<(Specialty, Doctor), DirectoryError> {
        debug!("Resolving selection {} / {}", specialty_id, doctor_id);

        let specialty = self.specialty(specialty_id)?;
        match specialty.doctor(doctor_id) {
            Some(doctor) => Ok((specialty.clone(), doctor.clone())),
            None => {
                // distinguish an unknown doctor from one listed elsewhere
                self.doctor(doctor_id)?;
                Err(DirectoryError::DoctorNotInSpecialty {
                    doctor_id: doctor_id.to_string(),
                    specialty_id: specialty_id.to_string(),
                })
            }
        }
    }
}

impl Default for DoctorDirectory {
    fn default() -> Self {
        Self::clinic_default()
    }
}
