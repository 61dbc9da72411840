use bevy::prelude::*;
use gridsight::errors::{GridSightError, GridSightResult};

/// Generic parser for delimited strings with a fixed number of fields
pub fn parse_delimited<T, E, const N: usize>(
    input: &str,
    delimiter: char,
    type_name: &str,
    parser: impl Fn(&str) -> Result<T, E>,
) -> GridSightResult<[T; N]>
where
    T: Copy + Default,
{
    let parts: Vec<&str> = input.split(delimiter).map(str::trim).collect();
    if parts.len() != N {
        return Err(GridSightError::InvalidInput {
            reason: format!(
                "Invalid {type_name} format '{input}'. Expected {N} {delimiter}-separated values"
            ),
        });
    }

    let mut result = [T::default(); N];
    for (i, part) in parts.iter().enumerate() {
        result[i] = parser(part).map_err(|_| GridSightError::InvalidInput {
            reason: format!("Invalid {type_name} value: '{part}'"),
        })?;
    }

    Ok(result)
}

/// Parse a cell string "X,Y"
pub fn parse_cell(cell_str: &str) -> GridSightResult<IVec2> {
    let [x, y] = parse_delimited::<i32, _, 2>(cell_str, ',', "cell", |s| s.parse())?;
    Ok(IVec2::new(x, y))
}

/// Parse a point string "X,Y"; coordinates must be finite
pub fn parse_point(point_str: &str) -> GridSightResult<Vec2> {
    let [x, y] = parse_delimited::<f32, _, 2>(point_str, ',', "point", |s| s.parse())?;
    if !(x.is_finite() && y.is_finite()) {
        return Err(GridSightError::InvalidInput {
            reason: format!("Point '{point_str}' must have finite coordinates"),
        });
    }
    Ok(Vec2::new(x, y))
}

/// Parse a polygon outline "X,Y;X,Y;X,Y" with at least three vertices
pub fn parse_vertices(vertices_str: &str) -> GridSightResult<Vec<Vec2>> {
    let vertices = vertices_str
        .split(';')
        .filter(|part| !part.trim().is_empty())
        .map(parse_point)
        .collect::<GridSightResult<Vec<_>>>()?;

    if vertices.len() < 3 {
        return Err(GridSightError::InvalidInput {
            reason: format!(
                "A polygon needs at least 3 vertices, got {}",
                vertices.len()
            ),
        });
    }

    Ok(vertices)
}

/// Parse size string "WIDTHxHEIGHT" with validation
pub fn parse_size(size_str: &str) -> GridSightResult<(u32, u32)> {
    let [width, height] = parse_delimited::<u32, _, 2>(size_str, 'x', "size", |s| s.parse())?;

    if width == 0 || height == 0 {
        return Err(GridSightError::InvalidInput {
            reason: "Width and height must be greater than 0".to_string(),
        });
    }

    if width > 2048 || height > 2048 {
        return Err(GridSightError::InvalidInput {
            reason: "Width and height must not exceed 2048".to_string(),
        });
    }

    Ok((width, height))
}

/// Validate obstacle density and clamp to valid range
pub fn validate_density(density: f32) -> f32 {
    if !(0.0..=1.0).contains(&density) {
        warn!("Obstacle density {density} is out of range [0.0, 1.0], clamping to valid range");
        density.clamp(0.0, 1.0)
    } else {
        density
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cell() {
        assert_eq!(parse_cell("3,4").unwrap(), IVec2::new(3, 4));
        assert_eq!(parse_cell("-1, 0").unwrap(), IVec2::new(-1, 0));

        assert!(parse_cell("3").is_err());
        assert!(parse_cell("1.5,2").is_err());
        assert!(parse_cell("a,b").is_err());
    }

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("0.5,2").unwrap(), Vec2::new(0.5, 2.0));
        assert!(parse_point("1,2,3").is_err());
        assert!(parse_point("inf,0").is_err());
    }

    #[test]
    fn test_parse_vertices() {
        let vertices = parse_vertices("0,0;2,0;0,2").unwrap();
        assert_eq!(
            vertices,
            vec![Vec2::ZERO, Vec2::new(2.0, 0.0), Vec2::new(0.0, 2.0)]
        );

        // Trailing separator is tolerated
        assert_eq!(parse_vertices("0,0;1,0;1,1;").unwrap().len(), 3);

        assert!(parse_vertices("0,0;1,0").is_err());
        assert!(parse_vertices("0,0;1;1,1").is_err());
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("64x64").unwrap(), (64, 64));
        assert_eq!(parse_size("128x256").unwrap(), (128, 256));

        assert!(parse_size("64").is_err());
        assert!(parse_size("0x64").is_err());
        assert!(parse_size("3000x64").is_err());
    }

    #[test]
    fn test_validate_density() {
        assert_eq!(validate_density(0.25), 0.25);
        assert_eq!(validate_density(-1.0), 0.0);
        assert_eq!(validate_density(3.0), 1.0);
    }
}
