//! The boundary between the actor and a Valhalla engine.
//!
//! An [`Engine`] is whatever actually computes routes and heights: an
//! executable, a remote server or a native library linked into the process.
//! Requests, configuration paths and responses cross this boundary as opaque
//! strings. The engine alone decides what they mean and how failure is
//! reported, which is why [`Engine::Error`] is an associated type.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::actor::ActorProviding;
use crate::error::ValhallaError;

/// The two operations an actor exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Path search between locations.
    Route,
    /// Elevation lookup along a shape.
    Height,
}

impl Action {
    /// All actions, in declaration order.
    pub const ALL: [Action; 2] = [Action::Route, Action::Height];

    /// The engine's name for this action, also used as the endpoint path.
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Route => "route",
            Action::Height => "height",
        }
    }

    /// Run this action on an actor.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use valhalla::{Action, Actor, ProcessEngine};
    ///
    /// let actor = Actor::new("/data/valhalla.json", ProcessEngine::default());
    /// let action: Action = "height".parse()?;
    /// let response = action.invoke(&actor, r#"{"range":true,"shape":[...]}"#)?;
    /// ```
    pub fn invoke<A>(self, actor: &A, request: &str) -> Result<String, A::Error>
    where
        A: ActorProviding + ?Sized,
    {
        match self {
            Action::Route => actor.route(request),
            Action::Height => actor.height(request),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ValhallaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "route" => Ok(Action::Route),
            "height" => Ok(Action::Height),
            _ => Err(ValhallaError::UnknownAction {
                name: s.to_string(),
            }),
        }
    }
}

/// A Valhalla engine entry point.
///
/// Implementations receive the request and configuration path exactly as the
/// actor was given them and must not expect any validation to have happened.
pub trait Engine {
    /// How this engine signals failure.
    type Error;

    /// Compute a route for `request` using the configuration at `config_path`.
    fn route(&self, request: &str, config_path: &str) -> Result<String, Self::Error>;

    /// Look up heights for `request` using the configuration at `config_path`.
    fn height(&self, request: &str, config_path: &str) -> Result<String, Self::Error>;

    /// Dispatch to [`Engine::route`] or [`Engine::height`].
    fn call(
        &self,
        action: Action,
        request: &str,
        config_path: &str,
    ) -> Result<String, Self::Error> {
        match action {
            Action::Route => self.route(request, config_path),
            Action::Height => self.height(request, config_path),
        }
    }
}

impl<E: Engine + ?Sized> Engine for &E {
    type Error = E::Error;

    fn route(&self, request: &str, config_path: &str) -> Result<String, Self::Error> {
        (**self).route(request, config_path)
    }

    fn height(&self, request: &str, config_path: &str) -> Result<String, Self::Error> {
        (**self).height(request, config_path)
    }
}

impl<E: Engine + ?Sized> Engine for Arc<E> {
    type Error = E::Error;

    fn route(&self, request: &str, config_path: &str) -> Result<String, Self::Error> {
        (**self).route(request, config_path)
    }

    fn height(&self, request: &str, config_path: &str) -> Result<String, Self::Error> {
        (**self).height(request, config_path)
    }
}

impl<E: Engine + ?Sized> Engine for Box<E> {
    type Error = E::Error;

    fn route(&self, request: &str, config_path: &str) -> Result<String, Self::Error> {
        (**self).route(request, config_path)
    }

    fn height(&self, request: &str, config_path: &str) -> Result<String, Self::Error> {
        (**self).height(request, config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    /// Engine that tags the response with the entry point it went through.
    struct TaggingEngine;

    impl Engine for TaggingEngine {
        type Error = Infallible;

        fn route(&self, request: &str, config_path: &str) -> Result<String, Infallible> {
            Ok(format!("route:{}:{}", config_path, request))
        }

        fn height(&self, request: &str, config_path: &str) -> Result<String, Infallible> {
            Ok(format!("height:{}:{}", config_path, request))
        }
    }

    #[test]
    fn test_action_as_str() {
        assert_eq!(Action::Route.as_str(), "route");
        assert_eq!(Action::Height.as_str(), "height");
        assert_eq!(Action::Height.to_string(), "height");
    }

    #[test]
    fn test_action_from_str() {
        assert_eq!("route".parse::<Action>().unwrap(), Action::Route);
        assert_eq!("HEIGHT".parse::<Action>().unwrap(), Action::Height);
        assert_eq!(" Route ".parse::<Action>().unwrap(), Action::Route);

        let err = "isochrone".parse::<Action>().unwrap_err();
        assert!(matches!(err, ValhallaError::UnknownAction { ref name } if name == "isochrone"));
    }

    #[test]
    fn test_engine_call_dispatch() {
        let engine = TaggingEngine;
        assert_eq!(
            engine.call(Action::Route, "r", "/cfg").unwrap(),
            "route:/cfg:r"
        );
        assert_eq!(
            engine.call(Action::Height, "h", "/cfg").unwrap(),
            "height:/cfg:h"
        );
    }

    #[test]
    fn test_engine_through_pointers() {
        let shared = Arc::new(TaggingEngine);
        assert_eq!(shared.route("a", "c").unwrap(), "route:c:a");

        let boxed: Box<TaggingEngine> = Box::new(TaggingEngine);
        assert_eq!(boxed.height("a", "c").unwrap(), "height:c:a");

        let borrowed = &TaggingEngine;
        assert_eq!(borrowed.call(Action::Route, "a", "c").unwrap(), "route:c:a");
    }
}
