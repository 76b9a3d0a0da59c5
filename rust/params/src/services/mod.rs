pub mod falcon;
pub mod knox;
pub mod storm;

use strum::{Display, EnumIter, EnumString};
use tracing::info;

use crate::{
    document::ConfigDocument, error::Result, facts::EnvironmentFacts, params::ResolvedParams,
};

#[derive(Clone, Copy, Debug, Display, EnumIter, EnumString, Eq, Hash, PartialEq)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Service {
    Falcon,
    Knox,
    Storm,
}

/// Translates a command document into the parameters of one service's scripts.
pub trait ServiceParams {
    fn service(&self) -> Service;

    fn resolve(
        &self,
        document: &ConfigDocument,
        facts: &EnvironmentFacts,
    ) -> Result<ResolvedParams>;
}

impl Service {
    pub fn params(self) -> Box<dyn ServiceParams> {
        match self {
            Service::Falcon => Box::new(falcon::FalconParams),
            Service::Knox => Box::new(knox::KnoxParams),
            Service::Storm => Box::new(storm::StormParams),
        }
    }

    pub fn resolve(
        self,
        document: &ConfigDocument,
        facts: &EnvironmentFacts,
    ) -> Result<ResolvedParams> {
        let params = self.params().resolve(document, facts)?;
        info!(
            service = %self,
            role = %facts.command_role,
            count = params.len(),
            "resolved service parameters"
        );
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    #[rstest]
    #[case("falcon", Service::Falcon)]
    #[case("KNOX", Service::Knox)]
    #[case("Storm", Service::Storm)]
    fn parses_service_names(#[case] name: &str, #[case] expected: Service) {
        assert_eq!(expected, name.parse::<Service>().unwrap());
    }

    #[test]
    fn dispatches_to_matching_params() {
        for service in Service::iter() {
            assert_eq!(service, service.params().service());
        }
    }

    #[test]
    fn displays_ambari_service_names() {
        assert_eq!("FALCON", Service::Falcon.to_string());
        assert!("HIVE".parse::<Service>().is_err());
    }
}
