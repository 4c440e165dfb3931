//! Prompt templating for the generation call.

use crate::advisory::RouteRequest;
use crate::intent::OptimizationIntent;

/// Build the single prompt string sent to the generator.
pub fn build_prompt(request: &RouteRequest, intent: &OptimizationIntent) -> String {
    format!(
        "You are a route planning assistant.\n\
\n\
Plan a trip from \"{pickup}\" to \"{destination}\".\n\
Travel purpose: {reason}. Optimize for: {goal}.\n\
Recommended algorithm: {algorithm}.\n\
\n\
Reply with a single ```json fenced block containing exactly these keys:\n\
- \"description\": 2-4 sentences describing the route\n\
- \"distance\": e.g. \"12.5 kilometers\"\n\
- \"time\": e.g. \"25-30 minutes\"\n\
- \"algorithm\": \"{algorithm}\"\n\
- \"landmarks\": up to 5 notable landmarks along the way\n\
- \"trafficNotes\": current or typical traffic conditions\n",
        pickup = request.pickup(),
        destination = request.destination(),
        reason = request.reason(),
        goal = intent.goal,
        algorithm = intent.algorithm_label,
    )
}
