use std::sync::Arc;

use anyhow::Result;
use informed::{AlsoLog, Arguments, Informee, Level, Logger, Registrar, TracingLogger};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

struct FancyService {
    fanciness: u32,
    logger: Option<Arc<dyn Logger>>,
}

impl Informee for FancyService {
    fn logger(&self) -> Arc<dyn Logger> {
        self.logger.clone().unwrap_or_else(informed::default_logger)
    }

    fn type_name(&self) -> &str {
        "FancyService"
    }
}

impl FancyService {
    fn new(fanciness: u32) -> Self {
        Self {
            fanciness,
            logger: None,
        }
    }

    fn do_something(&self, args: &Arguments) -> Result<&'static str> {
        let force = args.get_named("force").and_then(Value::as_bool).unwrap_or(false);
        if self.is_fancy() || force {
            Ok(self.do_it_fancy())
        } else {
            Ok(self.do_it_plain())
        }
    }

    fn is_fancy(&self) -> bool {
        self.fanciness > 10
    }

    fn do_it_plain(&self) -> &'static str {
        "so plain"
    }

    fn do_it_fancy(&self) -> &'static str {
        "so fancy"
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut registrar = Registrar::<FancyService>::new();
    registrar
        .accessor("fancy", FancyService::is_fancy)
        .accessor("fanciness", |service: &FancyService| service.fanciness);
    let do_something = registrar.inform_on_with_result(
        "do_something",
        FancyService::do_something,
        Level::Info,
        AlsoLog::values(["fancy", "force", "fanciness"]),
    )?;

    for (fanciness, force) in [(12, None), (12, Some(true)), (8, Some(true)), (8, Some(false))] {
        let service = FancyService::new(fanciness);
        let args = match force {
            Some(force) => Arguments::new().named("force", force),
            None => Arguments::new(),
        };
        let result = do_something.call(&service, &args)?;
        println!("=> {:?}", result);
    }

    // Same method, records routed into the tracing subscriber.
    let traced = FancyService {
        fanciness: 8,
        logger: Some(Arc::new(TracingLogger::new())),
    };
    let result = do_something.call(&traced, &Arguments::new().named("force", true))?;
    tracing::info!("traced call returned {:?}", result);

    Ok(())
}
