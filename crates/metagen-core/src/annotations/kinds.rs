//! Qualified names of the annotation kinds the built-in processors handle.

// Bean validation
pub const SIZE: &str = "javax.validation.constraints.Size";
pub const NOT_NULL: &str = "javax.validation.constraints.NotNull";
pub const PATTERN: &str = "javax.validation.constraints.Pattern";
pub const JAKARTA_SIZE: &str = "jakarta.validation.constraints.Size";
pub const JAKARTA_NOT_NULL: &str = "jakarta.validation.constraints.NotNull";
pub const JAKARTA_PATTERN: &str = "jakarta.validation.constraints.Pattern";

// Spring web
pub const REQUEST_MAPPING: &str = "org.springframework.web.bind.annotation.RequestMapping";
pub const GET_MAPPING: &str = "org.springframework.web.bind.annotation.GetMapping";
pub const POST_MAPPING: &str = "org.springframework.web.bind.annotation.PostMapping";
pub const PUT_MAPPING: &str = "org.springframework.web.bind.annotation.PutMapping";
pub const PATCH_MAPPING: &str = "org.springframework.web.bind.annotation.PatchMapping";
pub const DELETE_MAPPING: &str = "org.springframework.web.bind.annotation.DeleteMapping";
pub const REQUEST_BODY: &str = "org.springframework.web.bind.annotation.RequestBody";
pub const REST_CONTROLLER: &str = "org.springframework.web.bind.annotation.RestController";
pub const CONTROLLER: &str = "org.springframework.stereotype.Controller";
pub const SERVICE: &str = "org.springframework.stereotype.Service";
pub const COMPONENT: &str = "org.springframework.stereotype.Component";

// Swagger 2
pub const API: &str = "io.swagger.annotations.Api";
pub const API_OPERATION: &str = "io.swagger.annotations.ApiOperation";
pub const API_PARAM: &str = "io.swagger.annotations.ApiParam";
pub const API_IMPLICIT_PARAM: &str = "io.swagger.annotations.ApiImplicitParam";
pub const API_IMPLICIT_PARAMS: &str = "io.swagger.annotations.ApiImplicitParams";
pub const API_MODEL: &str = "io.swagger.annotations.ApiModel";
pub const API_MODEL_PROPERTY: &str = "io.swagger.annotations.ApiModelProperty";

// OpenAPI 3
pub const OPERATION: &str = "io.swagger.v3.oas.annotations.Operation";
pub const PARAMETER: &str = "io.swagger.v3.oas.annotations.Parameter";
pub const OAS_REQUEST_BODY: &str = "io.swagger.v3.oas.annotations.parameters.RequestBody";
pub const SCHEMA: &str = "io.swagger.v3.oas.annotations.media.Schema";
pub const TAG: &str = "io.swagger.v3.oas.annotations.tags.Tag";
pub const API_RESPONSE: &str = "io.swagger.v3.oas.annotations.responses.ApiResponse";

pub const ROUTE_KINDS: [&str; 6] = [
    REQUEST_MAPPING,
    GET_MAPPING,
    POST_MAPPING,
    PUT_MAPPING,
    PATCH_MAPPING,
    DELETE_MAPPING,
];

pub const CONTROLLER_KINDS: [&str; 2] = [CONTROLLER, REST_CONTROLLER];

pub const SERVICE_KINDS: [&str; 2] = [SERVICE, COMPONENT];

pub fn is_route(kind: &str) -> bool {
    ROUTE_KINDS.contains(&kind)
}
